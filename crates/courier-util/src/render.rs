//! Response rendering shared by the service's handlers.
//!
//! Produces status, content type and body; writing them to the wire is the
//! HTTP layer's job.

use serde::{Deserialize, Serialize};

use crate::error::UtilityError;

pub const CONTENT_JSON: &str = "application/json";
pub const CONTENT_TEXT: &str = "text/plain";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderOptions {
    /// Pretty-print JSON bodies.
    pub indent_json: bool,
    pub charset: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_json: false,
            charset: "UTF-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct Render {
    options: RenderOptions,
}

impl Render {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn json<T: Serialize + ?Sized>(
        &self,
        status: u16,
        value: &T,
    ) -> Result<Rendered, UtilityError> {
        let body = if self.options.indent_json {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|e| UtilityError::Render(format!("serialize json body: {e}")))?;

        Ok(Rendered {
            status,
            content_type: self.content_type(CONTENT_JSON),
            body,
        })
    }

    pub fn text(&self, status: u16, body: impl Into<String>) -> Rendered {
        Rendered {
            status,
            content_type: self.content_type(CONTENT_TEXT),
            body: body.into().into_bytes(),
        }
    }

    fn content_type(&self, base: &str) -> String {
        if self.options.charset.is_empty() {
            base.to_string()
        } else {
            format!("{base}; charset={}", self.options.charset)
        }
    }
}
