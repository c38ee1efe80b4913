//! Assembly manifest output.
//!
//! The manifest is an indented XML tree with one `family` node per part
//! family (corners, edges), each carrying static metadata about the CAD
//! geometry used to render the parts, and one `part` node per entity.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use tracing::debug;

use crate::error::ExportError;
use crate::math::{Point3, Vector3};
use crate::topology::Solid;

/// Description on the manifest root node.
const MODEL_DESC: &str = "Build a construction with rods and 3d printed corners.";

/// Description on the corner family node.
const CORNER_DESC: &str =
    "3D printed parts representing the vertices of the model. They connect rods together.";

/// Description on the edge family node.
const EDGE_DESC: &str = "Rods representing the edges of the model. You can get it with a \
laser cutting or simply by cutting rods by hands.";

/// Derives the manifest project name from a source mesh path: the filename
/// without its extension.
#[must_use]
pub fn project_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "model".to_owned(), |stem| stem.to_string_lossy().into_owned())
}

/// Writes the assembly manifest for a built solid to an arbitrary sink.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
pub fn write_manifest<W: Write>(
    solid: &Solid,
    project: &str,
    out: &mut W,
) -> Result<(), ExportError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("id", project));
    model.push_attribute(("unit", "mm"));
    model.push_attribute(("img", "yes"));
    model.push_attribute(("desc", MODEL_DESC));
    writer.write_event(Event::Start(model))?;

    write_corner_family(solid, &mut writer)?;
    write_edge_family(solid, &mut writer)?;

    writer.write_event(Event::End(BytesEnd::new("model")))?;

    debug!(project, "manifest serialized");
    Ok(())
}

/// Writes the assembly manifest to a file, attaching the path to any
/// failure. An interrupted write leaves an incomplete file behind; there is
/// no partial-write recovery.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_manifest_file(
    solid: &Solid,
    project: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_manifest(solid, project, &mut out).map_err(|e| e.with_path(path))?;
    out.flush().map_err(|e| ExportError::io(path, e))
}

fn write_corner_family<W: Write>(
    solid: &Solid,
    writer: &mut Writer<W>,
) -> Result<(), ExportError> {
    let mut family = BytesStart::new("family");
    family.push_attribute(("id", "corner"));
    family.push_attribute(("file", "corner.scad"));
    family.push_attribute(("light_file", "corner_light.scad"));
    family.push_attribute(("type", "stl"));
    family.push_attribute(("img", "0,0,0,45,0,45,140"));
    family.push_attribute(("desc", CORNER_DESC));
    writer.write_event(Event::Start(family))?;

    for corner in solid.corners() {
        let angles: Vec<String> = corner
            .angles
            .iter()
            .flat_map(|&(vertical, horizontal)| [vertical.to_string(), horizontal.to_string()])
            .collect();
        let connections: Vec<String> = corner
            .connections
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut part = BytesStart::new("part");
        part.push_attribute(("id", corner.id.to_string().as_str()));
        part.push_attribute(("pos", join_position(&corner.position).as_str()));
        // The data string is pushed pre-escaped: tuple attributes run through
        // escape() and would turn the quoting apostrophes into &apos;, but
        // downstream label printers expect the literal angles='…' form.
        part.push_attribute(Attribute {
            key: QName(b"data"),
            value: format!("angles='{}'", angles.join(",")).into_bytes().into(),
        });
        part.push_attribute(("connections", connections.join(";").as_str()));
        writer.write_event(Event::Empty(part))?;
    }

    writer.write_event(Event::End(BytesEnd::new("family")))?;
    Ok(())
}

fn write_edge_family<W: Write>(solid: &Solid, writer: &mut Writer<W>) -> Result<(), ExportError> {
    let mut family = BytesStart::new("family");
    family.push_attribute(("id", "edge"));
    family.push_attribute(("file", "edge.scad"));
    family.push_attribute(("type", "dxf"));
    family.push_attribute(("img", "yes"));
    family.push_attribute(("desc", EDGE_DESC));
    writer.write_event(Event::Start(family))?;

    for edge in solid.edges() {
        let mut part = BytesStart::new("part");
        part.push_attribute(("id", edge.id.to_string().as_str()));
        part.push_attribute(("pos", join_position(&edge.position).as_str()));
        part.push_attribute(("rot", join_rotation(&edge.rotation).as_str()));
        part.push_attribute(("data", format!("length={}", edge.length).as_str()));
        part.push_attribute(("connections", format!("{};{}", edge.start, edge.end).as_str()));
        writer.write_event(Event::Empty(part))?;
    }

    writer.write_event(Event::End(BytesEnd::new("family")))?;
    Ok(())
}

fn join_position(position: &Point3) -> String {
    format!("{},{},{}", position.x, position.y, position.z)
}

fn join_rotation(rotation: &Vector3) -> String {
    format!("{},{},{}", rotation.x, rotation.y, rotation.z)
}
