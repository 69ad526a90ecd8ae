use serde::{Deserialize, Serialize};

/// One page of a carousel.
///
/// `slide_number` is 1-based and equals the slide's position in its carousel;
/// [`crate::models::carousel::Carousel`] renumbers on every structural edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub slide_number: u32,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: String,

    /// Rendered as a callout only when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_point: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Slide {
            slide_number: 0,
            title: title.into(),
            body: body.into(),
            key_point: None,
        }
    }

    pub fn with_key_point(mut self, key_point: impl Into<String>) -> Self {
        self.key_point = Some(key_point.into());
        self
    }

    /// The key-point text, drawn as given, if it is non-empty.
    pub fn key_point_text(&self) -> Option<&str> {
        self.key_point.as_deref().filter(|text| !text.is_empty())
    }

    pub fn has_key_point(&self) -> bool {
        self.key_point_text().is_some()
    }
}

/// A partial update of one slide's text. Absent fields are left alone;
/// `key_point: Some(None)` clears the key point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideEdit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, with = "double_option")]
    pub key_point: Option<Option<String>>,
}

impl SlideEdit {
    pub(crate) fn apply_to(self, slide: &mut Slide) {
        if let Some(title) = self.title {
            slide.title = title;
        }
        if let Some(body) = self.body {
            slide.body = body;
        }
        if let Some(key_point) = self.key_point {
            slide.key_point = key_point;
        }
    }
}

/// Distinguishes a missing field (`None`) from an explicit `null` (`Some(None)`).
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
