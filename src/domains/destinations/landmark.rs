use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, fixed point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn location(&self) -> Point3 {
        Point3 {
            x: self.x,
            y: self.y,
            z: 0.0,
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({}, {})", self.name, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Inbound request for the destination list. The payload is only logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationRequest {
    pub data: String,
}

/// Wire response: `names[i]` is located at `locations[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationList {
    pub names: Vec<String>,
    pub locations: Vec<Point3>,
}
