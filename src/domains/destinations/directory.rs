use std::collections::HashSet;

use crate::common::{DomainError, DomainResult};
use crate::domains::logger::DynLogger;

use super::landmark::{DestinationList, Landmark};
use super::ports::LandmarkSource;

/// Landmarks loaded once at startup, in file order. Read-only afterwards.
///
/// Records are `name x y`, one per line. Parsing is lenient: a coordinate
/// that is not a number becomes its longest numeric prefix, or `0.0`, and the
/// record is still kept. Duplicate names are kept side by side.
#[derive(Debug, Clone, Default)]
pub struct DestinationDirectory {
    landmarks: Vec<Landmark>,
}

impl DestinationDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from `source`. A missing source gives an empty directory.
    pub fn load(source: &dyn LandmarkSource, logger: &DynLogger) -> DomainResult<Self> {
        match source.read_landmarks()? {
            Some(text) => {
                let directory = Self::parse(&text, logger);
                logger.info(&format!(
                    "Loaded {} landmark(s) from {}",
                    directory.len(),
                    source.describe()
                ));
                Ok(directory)
            }
            None => {
                logger.warn(&format!(
                    "Landmark source {} not found, starting with no destinations",
                    source.describe()
                ));
                Ok(Self::empty())
            }
        }
    }

    pub fn parse(text: &str, logger: &DynLogger) -> Self {
        let mut landmarks = Vec::new();
        let mut seen = HashSet::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let mut tokens = line.split_whitespace();
            let Some(name) = tokens.next() else {
                continue;
            };

            let x = coordinate(tokens.next(), "x", line_no, logger);
            let y = coordinate(tokens.next(), "y", line_no, logger);

            let extra: Vec<&str> = tokens.collect();
            if !extra.is_empty() {
                warn_malformed(logger, line_no, format!("ignoring trailing tokens {:?}", extra));
            }

            if !seen.insert(name.to_string()) {
                logger.warn(&format!(
                    "Duplicate landmark name '{}' on line {}, keeping both entries",
                    name, line_no
                ));
            }

            landmarks.push(Landmark::new(name, x, y));
        }

        Self { landmarks }
    }

    pub fn names(&self) -> Vec<String> {
        self.landmarks.iter().map(|l| l.name.clone()).collect()
    }

    pub fn landmarks(&self) -> Vec<Landmark> {
        self.landmarks.clone()
    }

    /// First landmark with the given name.
    pub fn find(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn destination_list(&self) -> DestinationList {
        DestinationList {
            names: self.names(),
            locations: self.landmarks.iter().map(Landmark::location).collect(),
        }
    }
}

fn coordinate(token: Option<&str>, axis: &str, line_no: usize, logger: &DynLogger) -> f64 {
    let Some(token) = token else {
        warn_malformed(logger, line_no, format!("missing {} coordinate, using 0.0", axis));
        return 0.0;
    };

    match token.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            let value = numeric_prefix(token).unwrap_or(0.0);
            warn_malformed(
                logger,
                line_no,
                format!("{} coordinate '{}' is not a number, using {}", axis, token, value),
            );
            value
        }
    }
}

/// Longest leading slice of `token` that parses as a float.
pub(crate) fn numeric_prefix(token: &str) -> Option<f64> {
    token
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| token[..end].parse::<f64>().ok())
}

fn warn_malformed(logger: &DynLogger, line: usize, reason: String) {
    logger.warn(&DomainError::MalformedLandmarkRecord { line, reason }.to_string());
}
