use tracing::trace;

use crate::lib::{
    view::ListingDocument,
    widget::{SinkError, StructuredDataSink},
};

/// Text of the `application/ld+json` record, replaced on every publication
#[derive(Debug, Default)]
pub struct JsonLdSlot {
    contents: Option<String>,
}

impl JsonLdSlot {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// The record as it would be embedded in a page
    pub fn script_tag(&self) -> Option<String> {
        self.contents()
            .map(|json| format!("<script type=\"application/ld+json\">{}</script>", json))
    }
}

impl StructuredDataSink for JsonLdSlot {
    fn publish(&mut self, doc: &ListingDocument) -> Result<(), SinkError> {
        let json = doc.to_json()?;
        trace!(bytes = json.len(), "structured data replaced");
        self.contents = Some(json);
        Ok(())
    }
}
