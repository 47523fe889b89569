/// Wavefront OBJ parser for triangulated meshes
use std::path::Path;

use log::info;
use nalgebra::{Vector2, Vector3};
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, i64 as integer, space1},
    combinator::{map, opt},
    multi::many1,
    number::complete::float,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Corner, Mesh};

/// One `v/t/n` group of a face line, indices as written in the file
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawCorner {
    vert: i64,
    tex: Option<i64>,
    norm: Option<i64>,
}

#[derive(Debug, PartialEq)]
enum Directive {
    Vertex(Vector3<f32>),
    Normal(Vector3<f32>),
    TexCoord(Vector2<f32>),
    Face(Vec<RawCorner>),
    Ignored,
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mesh = parse_obj(&text)?;
    info!(
        "loaded {}: v# {} f# {} vt# {} vn# {}",
        path.display(),
        mesh.nverts(),
        mesh.nfaces(),
        mesh.ntex(),
        mesh.nnormals()
    );
    Ok(mesh)
}

/// Parse OBJ text.
///
/// Faces must be triangles and may only reference attributes declared
/// above them. Negative indices count back from the latest attribute.
pub fn parse_obj(input: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();

    for (n, raw) in input.lines().enumerate() {
        let line = n + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let directive = match parse_directive(text) {
            Ok((rest, directive)) if rest.trim().is_empty() => directive,
            _ => {
                return Err(MeshError::Parse {
                    line,
                    message: format!("malformed line '{}'", text),
                })
            }
        };

        match directive {
            Directive::Vertex(v) => mesh.push_vert(v),
            Directive::Normal(v) => mesh.push_normal(v),
            Directive::TexCoord(uv) => mesh.push_uv(uv),
            Directive::Face(corners) => {
                if corners.len() != 3 {
                    return Err(MeshError::NonTriangular {
                        line,
                        corners: corners.len(),
                    });
                }
                let mut resolved = [Corner::new(0, None, None); 3];
                for (slot, corner) in resolved.iter_mut().zip(&corners) {
                    *slot = resolve(&mesh, line, corner)?;
                }
                mesh.push_face(resolved);
            }
            Directive::Ignored => {}
        }
    }

    Ok(mesh)
}

fn resolve(mesh: &Mesh, line: usize, corner: &RawCorner) -> Result<Corner, MeshError> {
    let vert = resolve_index(line, "vertex", corner.vert, mesh.nverts())?;
    let tex = corner
        .tex
        .map(|i| resolve_index(line, "texcoord", i, mesh.ntex()))
        .transpose()?;
    let norm = corner
        .norm
        .map(|i| resolve_index(line, "normal", i, mesh.nnormals()))
        .transpose()?;
    Ok(Corner::new(vert, tex, norm))
}

fn resolve_index(line: usize, kind: &'static str, index: i64, count: usize) -> Result<usize, MeshError> {
    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(MeshError::IndexOutOfRange {
            line,
            kind,
            index,
            count,
        });
    }
    Ok(resolved as usize)
}

fn parse_directive(input: &str) -> IResult<&str, Directive> {
    let (rest, keyword) = take_till1(|c: char| c.is_whitespace())(input)?;
    match keyword {
        "v" => map(pair(parse_vector3, opt(preceded(space1, float))), |(v, _w)| {
            Directive::Vertex(v)
        })(rest),
        "vn" => map(parse_vector3, Directive::Normal)(rest),
        "vt" => map(pair(parse_vector2, opt(preceded(space1, float))), |(uv, _w)| {
            Directive::TexCoord(uv)
        })(rest),
        "f" => map(many1(preceded(space1, parse_corner)), Directive::Face)(rest),
        _ => Ok(("", Directive::Ignored)),
    }
}

fn parse_corner(input: &str) -> IResult<&str, RawCorner> {
    let (input, vert) = integer(input)?;
    let (input, tex) = opt(preceded(char('/'), opt(integer)))(input)?;
    let (input, norm) = match tex {
        Some(_) => opt(preceded(char('/'), integer))(input)?,
        None => (input, None),
    };
    Ok((
        input,
        RawCorner {
            vert,
            tex: tex.flatten(),
            norm,
        },
    ))
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f32>> {
    map(
        tuple((
            preceded(space1, float),
            preceded(space1, float),
            preceded(space1, float),
        )),
        |(x, y, z)| Vector3::new(x, y, z),
    )(input)
}

fn parse_vector2(input: &str) -> IResult<&str, Vector2<f32>> {
    map(
        pair(preceded(space1, float), preceded(space1, float)),
        |(u, v)| Vector2::new(u, v),
    )(input)
}
