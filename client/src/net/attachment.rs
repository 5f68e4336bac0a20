//! Files attached to a prompt, carried to the model as base64 inline data.

#[cfg(test)]
#[path = "attachment_test.rs"]
mod attachment_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::generator::Part;

/// What the user attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Screenshot or mockup to clone.
    Image,
    /// Document whose data the dashboard should visualize.
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64 without a data-URL prefix.
    pub data: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    #[must_use]
    pub fn from_bytes(name: &str, declared_mime: &str, bytes: &[u8], kind: AttachmentKind) -> Self {
        Self {
            name: name.to_owned(),
            mime_type: infer_mime(name, declared_mime, kind).to_owned(),
            data: STANDARD.encode(bytes),
            kind,
        }
    }

    #[must_use]
    pub fn inline_part(&self) -> Part {
        Part::InlineData { mime_type: self.mime_type.clone(), data: self.data.clone() }
    }

    /// Read a browser `File` picked by the user.
    ///
    /// # Errors
    ///
    /// Returns the JS error text when the file cannot be read.
    #[cfg(feature = "csr")]
    pub async fn read(file: &web_sys::File, kind: AttachmentKind) -> Result<Self, String> {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("{e:?}"))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(Self::from_bytes(&file.name(), &file.type_(), &bytes, kind))
    }
}

/// First file chosen in the `<input type="file">` that fired `event`. The
/// input is reset so the same file can be picked again.
#[cfg(feature = "csr")]
pub fn picked_file(event: &web_sys::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = event.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}

/// Whole contents of a text file.
///
/// # Errors
///
/// Returns the JS error text when the file cannot be read as text.
#[cfg(feature = "csr")]
pub async fn read_text(file: &web_sys::File) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "file is not text".to_owned())
}

/// MIME type for an attachment: the browser-declared type when present,
/// otherwise a guess from the kind and file extension.
#[must_use]
pub fn infer_mime<'a>(name: &str, declared: &'a str, kind: AttachmentKind) -> &'a str {
    if !declared.trim().is_empty() {
        return declared;
    }
    if kind == AttachmentKind::Image {
        return "image/png";
    }
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        _ => "text/plain",
    }
}
