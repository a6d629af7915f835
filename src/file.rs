use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::model::{BodyInfo, SolarSystem};

/// The ten bodies the renderer starts with when no file is given.
pub const DEFAULT_BODIES: &str = include_str!("../bodies.txt");

pub fn default_system() -> Result<SolarSystem, ConfigError> {
    parse_bodies(DEFAULT_BODIES)
}

pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<SolarSystem, ConfigError> {
    let contents = fs::read_to_string(filename)?;
    parse_bodies(&contents)
}

/// Reads one body per line, as `name parent distance speed scale`, where a
/// parent of `-` makes an anchor. The first line is a header.
pub fn parse_bodies(contents: &str) -> Result<SolarSystem, ConfigError> {
    let mut system = SolarSystem::new();

    // Read lines, skipping header
    for (line_idx, line) in contents.lines().enumerate().skip(1) {
        let line_no = line_idx + 1;
        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let mut fields = line.split_ascii_whitespace();

        let malformed = |message: String| ConfigError::Malformed {
            line: line_no,
            message,
        };

        macro_rules! next_string {
            ($what:expr) => {
                fields
                    .next()
                    .ok_or_else(|| malformed(format!("missing {}", $what)))?
            };
        }

        macro_rules! next_f32 {
            ($what:expr) => {{
                let field = next_string!($what);
                field
                    .parse::<f32>()
                    .map_err(|e| malformed(format!("bad {} {:?}: {}", $what, field, e)))?
            }};
        }

        // Get name, or skip the line if it's blank
        let name = match fields.next() {
            Some(name) => name,
            None => continue,
        };
        let parent = next_string!("parent");

        let body_info = BodyInfo {
            name: name.to_owned(),
            distance: next_f32!("distance"),
            speed: next_f32!("speed"),
            scale: next_f32!("scale"),
        };

        if let Some(extra) = fields.next() {
            return Err(malformed(format!("unexpected field {:?}", extra)));
        }

        if parent == "-" {
            system.add_anchor(body_info)?;
        } else {
            let parent_id = system
                .find(parent)
                .ok_or_else(|| ConfigError::UnknownParent {
                    child: name.to_owned(),
                    parent: parent.to_owned(),
                })?;
            system.add_child(body_info, parent_id)?;
        }
    }

    if system.anchors().next().is_none() {
        return Err(ConfigError::NoAnchor);
    }

    Ok(system)
}
