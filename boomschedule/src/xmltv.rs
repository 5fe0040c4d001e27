//! Rendu XMLTV du guide des programmes
//!
//! Les horaires absolus sont calculés en parcourant la programmation
//! matérialisée depuis minuit (UTC) et en accumulant les durées : le
//! `stop` d'un programme est exactement le `start` du suivant.

use boomstore::{Channel, MediaFile};
use chrono::{DateTime, Duration, Utc};
use xmltree::{Element, EmitterConfig, XMLNode};

/// Une chaîne et sa programmation matérialisée, prêtes pour le guide
pub struct GuideChannel<'a> {
    pub channel: &'a Channel,
    pub schedule: Vec<MediaFile>,
}

/// Horodatage XMLTV : `YYYYMMDDHHMMSS +0000`
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y%m%d%H%M%S +0000").to_string()
}

/// Sérialise le guide complet en document XMLTV
pub fn render_guide(entries: &[GuideChannel<'_>], day_start: DateTime<Utc>) -> String {
    let mut tv = Element::new("tv");

    for entry in entries {
        let mut channel_elem = Element::new("channel");
        channel_elem
            .attributes
            .insert("id".to_string(), entry.channel.id.to_string());

        let mut display_name = Element::new("display-name");
        display_name
            .children
            .push(XMLNode::Text(entry.channel.name.clone()));
        channel_elem.children.push(XMLNode::Element(display_name));

        if let Some(thumbnail) = &entry.channel.thumbnail {
            let mut icon = Element::new("icon");
            icon.attributes.insert("src".to_string(), thumbnail.clone());
            channel_elem.children.push(XMLNode::Element(icon));
        }

        tv.children.push(XMLNode::Element(channel_elem));
    }

    for entry in entries {
        let mut current = day_start;
        for program in &entry.schedule {
            let duration = program.duration.unwrap_or(0.0);
            let stop = current + Duration::milliseconds((duration * 1000.0) as i64);
            tv.children
                .push(XMLNode::Element(programme_element(entry.channel, program, current, stop)));
            current = stop;
        }
    }

    to_xml(&tv)
}

fn programme_element(
    channel: &Channel,
    program: &MediaFile,
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
) -> Element {
    let mut elem = Element::new("programme");
    elem.attributes
        .insert("start".to_string(), format_timestamp(start));
    elem.attributes
        .insert("stop".to_string(), format_timestamp(stop));
    elem.attributes
        .insert("channel".to_string(), channel.id.to_string());

    let mut title = Element::new("title");
    title.attributes.insert("lang".to_string(), "en".to_string());
    let title_text = if program.title.is_empty() {
        "Untitled".to_string()
    } else {
        program.title.clone()
    };
    title.children.push(XMLNode::Text(title_text));
    elem.children.push(XMLNode::Element(title));

    let mut desc = Element::new("desc");
    desc.attributes.insert("lang".to_string(), "en".to_string());
    let desc_text = if program.summary.is_empty() {
        "No description available.".to_string()
    } else {
        program.summary.clone()
    };
    desc.children.push(XMLNode::Text(desc_text));
    elem.children.push(XMLNode::Element(desc));

    let mut category = Element::new("category");
    category
        .attributes
        .insert("lang".to_string(), "en".to_string());
    let category_text = if program.category.is_empty() {
        "General".to_string()
    } else {
        program.category.clone()
    };
    category.children.push(XMLNode::Text(category_text));
    elem.children.push(XMLNode::Element(category));

    if let Some(thumbnail) = &program.thumbnail {
        let mut icon = Element::new("icon");
        icon.attributes.insert("src".to_string(), thumbnail.clone());
        elem.children.push(XMLNode::Element(icon));
    }

    elem
}

/// Sérialise un arbre XML avec indentation et en-tête
pub(crate) fn to_xml(elem: &Element) -> String {
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(true)
        .indent_string("  ");

    let mut buf = Vec::new();
    elem.write_with_config(&mut buf, config)
        .expect("Failed to write XML");

    let mut xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n".to_string();
    xml.push_str(&String::from_utf8(buf).expect("Invalid UTF-8"));
    xml
}
