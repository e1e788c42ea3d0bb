//! Attribute validation: recognized keys become typed fields, anything else overflows.

use crate::error::{Error, Result};
use moray_graph::{Dir, Edge, EdgeStyle, Graph, GraphAttrs, NodeId, RankSpec};

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_u16(name: &str, value: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|_| Error::Attribute {
        name: name.to_string(),
        value: value.to_string(),
        expected: "a small non-negative integer",
    })
}

pub fn set_graph_attr(attrs: &mut GraphAttrs, name: &str, value: &str) -> Result<()> {
    match name {
        "flow" => {
            attrs.flow = Dir::from_attr(value).ok_or_else(|| Error::Attribute {
                name: name.to_string(),
                value: value.to_string(),
                expected: "east, south, west, or north",
            })?;
        }
        "root" => attrs.root = Some(value.trim().to_string()),
        _ => {
            attrs
                .overflow
                .insert(name.to_string(), value.trim().to_string());
        }
    }
    Ok(())
}

pub fn set_node_attr(g: &mut Graph, id: NodeId, name: &str, value: &str) -> Result<()> {
    let node = g.node_mut(id);
    match name {
        "label" => node.label = value.trim().to_string(),
        "rank" => {
            let v = value.trim();
            node.attrs.rank = Some(if v.eq_ignore_ascii_case("same") {
                RankSpec::Same
            } else {
                let level = v.parse::<i32>().map_err(|_| Error::Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                    expected: "an integer or `same`",
                })?;
                RankSpec::Level(level)
            });
        }
        "root" => node.attrs.root = truthy(value),
        "minwidth" => node.attrs.minwidth = Some(parse_u16(name, value)?),
        "minheight" => node.attrs.minheight = Some(parse_u16(name, value)?),
        _ => {
            node.attrs
                .overflow
                .insert(name.to_string(), value.trim().to_string());
        }
    }
    Ok(())
}

pub fn set_edge_attr(edge: &mut Edge, name: &str, value: &str) -> Result<()> {
    match name {
        "label" => edge.label = Some(value.trim().to_string()),
        "minlen" => edge.attrs.minlen = Some(parse_u16(name, value)?),
        "style" => {
            edge.style = match value.trim().to_ascii_lowercase().as_str() {
                "solid" => EdgeStyle::Solid,
                "dashed" => EdgeStyle::Dashed,
                "dotted" => EdgeStyle::Dotted,
                "wave" => EdgeStyle::Wave,
                "double" => EdgeStyle::Double,
                "bold" => EdgeStyle::Bold,
                _ => {
                    return Err(Error::Attribute {
                        name: name.to_string(),
                        value: value.to_string(),
                        expected: "solid, dashed, dotted, wave, double, or bold",
                    });
                }
            };
        }
        _ => {
            edge.attrs
                .overflow
                .insert(name.to_string(), value.trim().to_string());
        }
    }
    Ok(())
}
