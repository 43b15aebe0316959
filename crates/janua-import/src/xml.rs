//! `janua_scene` XML reader.
//!
//! The document is read into a small element tree first, so a malformed
//! document fails as a whole before any mesh is validated. Each child of
//! `<meshes>` is then checked independently:
//!
//! ```xml
//! <janua_scene>
//!   <meshes>
//!     <mesh id="0" type="OCCLUDER" triCount="1">0 0 0 1 0 0 0 1 0</mesh>
//!   </meshes>
//! </janua_scene>
//! ```

use std::collections::HashSet;
use std::path::Path;

use janua_mesh::{Diagnostics, MeshRecord, MeshRole, FLOATS_PER_TRIANGLE};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ImportError, XmlIssue};
use crate::tokenize::{parse_f32, parse_u32, Tokens};

const ROOT_ELEMENT: &str = "janua_scene";
const MESHES_ELEMENT: &str = "meshes";

/// Read an XML scene file.
///
/// Per-mesh problems are appended to `diagnostics` and the mesh is skipped;
/// the call still succeeds as long as the document structure is valid.
pub fn load_xml(
    path: impl AsRef<Path>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<MeshRecord>, ImportError> {
    let text = std::fs::read_to_string(path)?;
    load_xml_from_str(&text, diagnostics)
}

/// Read an XML scene from memory.
pub fn load_xml_from_str(
    text: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<MeshRecord>, ImportError> {
    let document = parse_document(text)?;
    let root = document
        .iter()
        .find(|el| el.name == ROOT_ELEMENT)
        .ok_or(ImportError::MissingRoot)?;
    let meshes_node = root.child(MESHES_ELEMENT).ok_or(ImportError::MissingMeshes)?;

    let mut seen_ids = HashSet::new();
    let mut meshes = Vec::new();
    for (position, node) in meshes_node.children.iter().enumerate() {
        match read_mesh(position, node, &mut seen_ids) {
            Ok(mesh) => meshes.push(mesh),
            Err(issue) => diagnostics.record(issue.to_string()),
        }
    }

    debug!(
        "read {} of {} mesh elements",
        meshes.len(),
        meshes_node.children.len()
    );
    Ok(meshes)
}

/// Validate one mesh element and convert it into a record.
fn read_mesh(
    position: usize,
    node: &Element,
    seen_ids: &mut HashSet<u32>,
) -> Result<MeshRecord, XmlIssue> {
    let raw_id = node.attribute("id").unwrap_or_default();
    let id = parse_u32(raw_id).ok_or_else(|| XmlIssue::InvalidId {
        position,
        raw: raw_id.to_string(),
    })?;
    // The id is claimed even if a later check rejects this mesh.
    if !seen_ids.insert(id) {
        return Err(XmlIssue::DuplicateId(id));
    }

    let raw_type = node.attribute("type").unwrap_or_default();
    let role: MeshRole = raw_type.parse().map_err(|_| XmlIssue::BadType {
        id,
        raw: raw_type.to_string(),
    })?;

    let raw_tri_count = node.attribute("triCount").unwrap_or_default();
    let invalid_tri_count = || XmlIssue::InvalidTriCount {
        id,
        raw: raw_tri_count.to_string(),
    };
    let tri_count = parse_u32(raw_tri_count).ok_or_else(invalid_tri_count)?;
    let expected = (tri_count as usize)
        .checked_mul(FLOATS_PER_TRIANGLE)
        .ok_or_else(invalid_tri_count)?;

    // triCount is untrusted; grow with the body instead of reserving up front.
    let mut vertices = Vec::new();
    for token in Tokens::new(&node.text) {
        if vertices.len() == expected {
            return Err(XmlIssue::TooManyValues { id, tri_count });
        }
        let value = parse_f32(token).ok_or_else(|| XmlIssue::InvalidCoordinate {
            id,
            token: token.to_string(),
        })?;
        vertices.push(value);
    }

    if vertices.len() != expected {
        return Err(XmlIssue::CountMismatch {
            id,
            tri_count,
            expected,
            found: vertices.len(),
        });
    }

    MeshRecord::new(id, role, vertices).map_err(|source| XmlIssue::Record { id, source })
}

/// Minimal element tree: name, attributes, concatenated text and children.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ImportError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|el| el.name == name)
    }
}

/// Parse the whole document into its top-level elements.
fn parse_document(text: &str) -> Result<Vec<Element>, ImportError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut top_level = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut top_level, element);
            }
            Event::End(_) => {
                // quick-xml checks end names, so the stack is never empty here.
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut top_level, element);
                }
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ImportError::UnclosedElement(open.name));
    }
    Ok(top_level)
}

fn attach(stack: &mut [Element], top_level: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => top_level.push(element),
    }
}
