use cloudcrop_core::PointCloud;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DataFormat {
    Ascii,
    Binary,
}

/// Header of a PCD file, reduced to what the body parsers need.
#[derive(Debug)]
struct PcdHeader {
    format: DataFormat,
    points: usize,
    fields: Vec<String>,
    /// Byte offset of the first body byte, just past the DATA line.
    body_offset: usize,
}

/// Reads a PCD file with an ASCII or binary DATA section.
///
/// Only the x, y and z fields are kept; other per-point fields are skipped.
/// All fields are assumed to be 4-byte scalars, which covers the clouds this
/// tool consumes.
pub fn read_pcd(path: impl AsRef<Path>) -> io::Result<PointCloud> {
    let raw = fs::read(path)?;
    let header = parse_header(&raw)?;

    match header.format {
        DataFormat::Ascii => parse_ascii_body(&raw, &header),
        DataFormat::Binary => parse_binary_body(&raw, &header),
    }
}

/// Writes a cloud as an ASCII v0.7 PCD file.
pub fn write_pcd(path: impl AsRef<Path>, cloud: &PointCloud) -> io::Result<()> {
    let mut out = String::with_capacity(160 + cloud.len() * 24);
    out.push_str(
        "# .PCD v0.7 - Point Cloud Data file format\n\
         VERSION 0.7\n\
         FIELDS x y z\n\
         SIZE 4 4 4\n\
         TYPE F F F\n\
         COUNT 1 1 1\n",
    );
    out.push_str(&format!(
        "WIDTH {}\nHEIGHT 1\nVIEWPOINT 0 0 0 1 0 0 0\nPOINTS {}\nDATA ascii\n",
        cloud.len(),
        cloud.len()
    ));

    for [x, y, z] in cloud.iter_points() {
        out.push_str(&format!("{} {} {}\n", x, y, z));
    }

    fs::write(path, out)
}

fn invalid_data(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn parse_header(raw: &[u8]) -> io::Result<PcdHeader> {
    let mut format = None;
    let mut points = None;
    let mut width = None;
    let mut fields = vec!["x".to_string(), "y".to_string(), "z".to_string()];

    let mut offset = 0;
    while offset < raw.len() {
        let end = raw[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|pos| offset + pos + 1)
            .unwrap_or(raw.len());
        let line = std::str::from_utf8(&raw[offset..end])
            .map_err(|_| invalid_data("PCD header is not valid UTF-8"))?
            .trim();
        offset = end;

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("FIELDS") => fields = parts.map(str::to_string).collect(),
            Some("WIDTH") => width = Some(parse_count(parts.next(), "WIDTH")?),
            Some("POINTS") => points = Some(parse_count(parts.next(), "POINTS")?),
            Some("DATA") => {
                format = Some(match parts.next() {
                    Some("ascii") => DataFormat::Ascii,
                    Some("binary") => DataFormat::Binary,
                    other => {
                        return Err(io::Error::new(
                            io::ErrorKind::Unsupported,
                            format!("unsupported PCD DATA format: {}", other.unwrap_or("<none>")),
                        ))
                    }
                });
                break;
            }
            _ => {}
        }
    }

    let format = format.ok_or_else(|| invalid_data("PCD file missing DATA line"))?;
    let points = points
        .or(width)
        .ok_or_else(|| invalid_data("PCD file missing POINTS/WIDTH header"))?;

    Ok(PcdHeader {
        format,
        points,
        fields,
        body_offset: offset,
    })
}

fn parse_count(value: Option<&str>, key: &str) -> io::Result<usize> {
    value
        .ok_or_else(|| invalid_data(format!("PCD {} line has no value", key)))?
        .parse::<usize>()
        .map_err(|e| invalid_data(format!("invalid PCD {} value: {}", key, e)))
}

fn field_indices(fields: &[String]) -> io::Result<(usize, usize, usize)> {
    let find = |name: &str| fields.iter().position(|f| f == name);
    match (find("x"), find("y"), find("z")) {
        (Some(ix), Some(iy), Some(iz)) => Ok((ix, iy, iz)),
        _ => Err(invalid_data("PCD file missing x, y, z fields")),
    }
}

fn parse_ascii_body(raw: &[u8], header: &PcdHeader) -> io::Result<PointCloud> {
    let (ix, iy, iz) = field_indices(&header.fields)?;
    let needed = ix.max(iy).max(iz) + 1;

    let text = std::str::from_utf8(&raw[header.body_offset..])
        .map_err(|_| invalid_data("PCD ASCII body is not valid UTF-8"))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        if values.len() < needed {
            return Err(invalid_data(format!("truncated point record: {:?}", line)));
        }

        x.push(parse_coord(values[ix])?);
        y.push(parse_coord(values[iy])?);
        z.push(parse_coord(values[iz])?);
    }

    Ok(PointCloud::from_xyz(x, y, z))
}

fn parse_coord(token: &str) -> io::Result<f32> {
    token
        .parse::<f32>()
        .map_err(|e| invalid_data(format!("invalid coordinate {:?}: {}", token, e)))
}

fn parse_binary_body(raw: &[u8], header: &PcdHeader) -> io::Result<PointCloud> {
    let (ix, iy, iz) = field_indices(&header.fields)?;

    let stride = header.fields.len() * 4;
    let body = &raw[header.body_offset..];
    let expected = header.points * stride;
    if body.len() < expected {
        return Err(invalid_data(format!(
            "binary PCD body too short: have {} bytes, expected {} ({} points x {} bytes)",
            body.len(),
            expected,
            header.points,
            stride
        )));
    }

    let mut x = Vec::with_capacity(header.points);
    let mut y = Vec::with_capacity(header.points);
    let mut z = Vec::with_capacity(header.points);

    let read_f32 = |record: &[u8], field: usize| {
        let at = field * 4;
        f32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
    };

    for record in body.chunks_exact(stride).take(header.points) {
        x.push(read_f32(record, ix));
        y.push(read_f32(record, iy));
        z.push(read_f32(record, iz));
    }

    Ok(PointCloud::from_xyz(x, y, z))
}
