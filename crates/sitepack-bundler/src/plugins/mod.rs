//! Plugins attached to the Rolldown pipeline.

pub mod css;

pub use css::{CssPlugin, CssPluginOptions};

use crate::config::{BuildConfig, PluginKind};
use rolldown_plugin::__inner::SharedPluginable;
use std::sync::Arc;

/// Instantiate the plugins named by a config, in order.
pub(crate) fn instantiate(config: &BuildConfig) -> Vec<SharedPluginable> {
    config
        .plugins
        .iter()
        .map(|kind| -> SharedPluginable {
            match kind {
                PluginKind::Css => Arc::new(CssPlugin::with_options(CssPluginOptions::from_config(
                    config,
                ))),
            }
        })
        .collect()
}
