//! Recursion and stencil budget configuration
//!
//! `visible_portal_count_for_layer[l]` bounds how many portals are drawn at
//! recursion depth `l + 1`. Every layer needs enough stencil bits for its
//! portal ids, and all layers share one 8 bit stencil byte.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::stencil::STENCIL_BIT_COUNT;
use crate::error::{PortalError, PortalResult};
use crate::portal::recursion_tree;
use crate::portal::stencil_ref_tree::bits_for_layer;
use crate::portal::StencilRefTree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalRenderConfig {
    pub max_recursion_count: usize,
    pub visible_portal_count_for_layer: Vec<u32>,
}

impl Default for PortalRenderConfig {
    fn default() -> Self {
        Self {
            max_recursion_count: 2,
            visible_portal_count_for_layer: vec![4, 4],
        }
    }
}

impl PortalRenderConfig {
    pub fn from_toml_str(source: &str) -> PortalResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PortalResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| PortalError::io(path, e))?;
        let config = Self::from_toml_str(&source)?;

        log::info!(
            "[PortalRenderConfig] Loaded {}: max_recursion_count={}, visible portals per layer={:?}",
            path.display(),
            config.max_recursion_count,
            config.visible_portal_count_for_layer
        );
        Ok(config)
    }

    /// Validate configuration against a scene with `endpoint_count` portal endpoints
    pub fn validate(&self, endpoint_count: usize) -> PortalResult<()> {
        if self.visible_portal_count_for_layer.len() != self.max_recursion_count {
            return Err(PortalError::invalid_config(
                "visible_portal_count_for_layer",
                format!("{:?}", self.visible_portal_count_for_layer),
                format!(
                    "expected one entry per recursion layer ({}). {}",
                    self.max_recursion_count,
                    self.suggest_safe_config(endpoint_count)
                ),
            ));
        }

        for (layer, &count) in self.visible_portal_count_for_layer.iter().enumerate() {
            if count as usize > endpoint_count {
                return Err(PortalError::invalid_config(
                    "visible_portal_count_for_layer",
                    count,
                    format!(
                        "layer {} shows more portals than the scene's {} endpoints",
                        layer, endpoint_count
                    ),
                ));
            }
        }

        let stencil_bits = self.stencil_bit_count();
        if stencil_bits > STENCIL_BIT_COUNT {
            return Err(PortalError::invalid_config(
                "visible_portal_count_for_layer",
                format!("{:?}", self.visible_portal_count_for_layer),
                format!(
                    "needs {} stencil bits, only {} available. {}",
                    stencil_bits,
                    STENCIL_BIT_COUNT,
                    self.suggest_safe_config(endpoint_count)
                ),
            ));
        }

        log::info!(
            "[PortalRenderConfig] Configuration validated: {} layers, {} stencil bits, {} camera indices",
            self.max_recursion_count,
            stencil_bits,
            self.camera_index_buffer_element_count()
        );
        Ok(())
    }

    /// Stencil bits used by all layers together
    pub fn stencil_bit_count(&self) -> u32 {
        self.visible_portal_count_for_layer
            .iter()
            .map(|&count| bits_for_layer(count))
            .sum()
    }

    /// Camera index buffer size, root camera included
    pub fn camera_index_buffer_element_count(&self) -> usize {
        recursion_tree::get_camera_index_buffer_element_count(&self.visible_portal_count_for_layer)
    }

    /// Validates and builds the matching stencil tree
    pub fn build_stencil_ref_tree(&self, endpoint_count: usize) -> PortalResult<StencilRefTree> {
        self.validate(endpoint_count)?;
        Ok(StencilRefTree::new(&self.visible_portal_count_for_layer))
    }

    /// Deepest recursion that still fits the stencil byte when every layer
    /// shows all `endpoint_count` endpoints
    pub fn max_uniform_recursion_depth(endpoint_count: usize) -> usize {
        let bits = bits_for_layer(endpoint_count as u32);
        if bits == 0 {
            return 0;
        }
        (STENCIL_BIT_COUNT / bits) as usize
    }

    /// Suggest safe configuration parameters
    pub fn suggest_safe_config(&self, endpoint_count: usize) -> String {
        let mut suggestions = Vec::new();

        let uniform_depth = Self::max_uniform_recursion_depth(endpoint_count);
        suggestions.push(format!(
            "With {} portal endpoints, all of them fit into {} recursion layers",
            endpoint_count, uniform_depth
        ));

        if self.max_recursion_count > 0 {
            let bits_per_layer = STENCIL_BIT_COUNT as usize / self.max_recursion_count;
            let max_count = if bits_per_layer >= u32::BITS as usize {
                u32::MAX
            } else {
                (1u32 << bits_per_layer) - 1
            };
            suggestions.push(format!(
                "For max_recursion_count={}, show at most {} portals per layer",
                self.max_recursion_count,
                max_count.min(endpoint_count as u32)
            ));
        }

        suggestions.join("\n")
    }
}
