// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Converts standard materials to descriptors and back.

use forma_core::lane::{Lane, LaneKind};
use forma_core::math::Color;
use forma_core::scene::StandardMaterial;
use forma_data::scene::MaterialDescriptor;

/// The material codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialCodecLane;

impl MaterialCodecLane {
    /// Creates a new instance of the lane.
    pub fn new() -> Self {
        Self
    }

    /// Encodes a material. The emissive color is only written when not black.
    pub fn encode(&self, material: &StandardMaterial) -> MaterialDescriptor {
        MaterialDescriptor {
            color_hex: Some(material.color.to_hex()),
            opacity: Some(material.opacity),
            transparent: Some(material.transparent),
            metalness: Some(material.metalness),
            roughness: Some(material.roughness),
            wireframe: Some(material.wireframe),
            emissive_hex: material
                .is_emissive()
                .then(|| material.emissive.to_hex()),
        }
    }

    /// Decodes a material. Every field defaults on its own, and an absent
    /// descriptor yields the default material.
    pub fn decode(&self, descriptor: Option<&MaterialDescriptor>) -> StandardMaterial {
        let defaults = StandardMaterial::default();
        let Some(descriptor) = descriptor else {
            return defaults;
        };

        StandardMaterial {
            color: color(descriptor.color_hex.as_deref()).unwrap_or(defaults.color),
            opacity: unit(descriptor.opacity).unwrap_or(defaults.opacity),
            transparent: descriptor.transparent.unwrap_or(defaults.transparent),
            metalness: unit(descriptor.metalness).unwrap_or(defaults.metalness),
            roughness: unit(descriptor.roughness).unwrap_or(defaults.roughness),
            wireframe: descriptor.wireframe.unwrap_or(defaults.wireframe),
            emissive: color(descriptor.emissive_hex.as_deref()).unwrap_or(defaults.emissive),
        }
    }
}

fn color(hex: Option<&str>) -> Option<Color> {
    let hex = hex?;
    let parsed = Color::from_hex(hex);
    if parsed.is_none() {
        log::debug!("Ignoring unparsable color '{hex}'");
    }
    parsed
}

fn unit(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite()).map(|v| v.clamp(0.0, 1.0))
}

impl Lane for MaterialCodecLane {
    fn strategy_name(&self) -> &'static str {
        "FORMA_MATERIAL_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Codec
    }
}
