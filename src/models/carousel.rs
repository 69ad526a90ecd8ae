use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarouselError, Result};
use crate::models::branding::BrandingOverride;
use crate::models::slide::{Slide, SlideEdit};
use crate::models::template::Template;
use crate::templates::{apply_branding_overrides, get_template};

/// Publication state of a carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselStatus {
    /// Being edited. The only state in which slides may change.
    #[default]
    Draft,
    /// A document has been exported.
    Ready,
    /// Queued for a later publish.
    Scheduled,
    /// Posted to the network. Terminal.
    Published,
}

impl CarouselStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarouselStatus::Draft => "draft",
            CarouselStatus::Ready => "ready",
            CarouselStatus::Scheduled => "scheduled",
            CarouselStatus::Published => "published",
        }
    }
}

/// The persisted carousel aggregate, scoped to one workspace.
///
/// Deserializing goes through `CarouselRecord`, so stored rows get the same checks
/// as [`Carousel::new`]: at least one slide, numbered by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CarouselRecord")]
pub struct Carousel {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    /// Registry id of the visual template. Unknown ids render with the default template.
    pub template_type: String,

    slide_data: Vec<Slide>,

    #[serde(default)]
    status: CarouselStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_branding: Option<BrandingOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_generated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_post_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_post_url: Option<String>,
}

/// A carousel row as stored, before validation.
#[derive(Debug, Deserialize)]
struct CarouselRecord {
    id: String,
    workspace_id: String,
    title: String,
    template_type: String,
    slide_data: Vec<Slide>,
    #[serde(default)]
    status: CarouselStatus,
    #[serde(default)]
    custom_branding: Option<BrandingOverride>,
    #[serde(default)]
    pdf_generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    linkedin_post_id: Option<String>,
    #[serde(default)]
    linkedin_post_url: Option<String>,
}

impl TryFrom<CarouselRecord> for Carousel {
    type Error = CarouselError;

    fn try_from(record: CarouselRecord) -> Result<Self> {
        let mut carousel = Carousel::new(
            record.id,
            record.workspace_id,
            record.title,
            record.template_type,
            record.slide_data,
        )?;
        carousel.status = record.status;
        carousel.custom_branding = record.custom_branding;
        carousel.pdf_generated_at = record.pdf_generated_at;
        carousel.scheduled_for = record.scheduled_for;
        carousel.linkedin_post_id = record.linkedin_post_id;
        carousel.linkedin_post_url = record.linkedin_post_url;
        Ok(carousel)
    }
}

impl Carousel {
    /// Creates a draft carousel. Fails if `slides` is empty.
    pub fn new(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        title: impl Into<String>,
        template_type: impl Into<String>,
        slides: Vec<Slide>,
    ) -> Result<Self> {
        if slides.is_empty() {
            return Err(CarouselError::InvalidInput(
                "A carousel needs at least one slide".to_string(),
            ));
        }
        let mut carousel = Carousel {
            id: id.into(),
            workspace_id: workspace_id.into(),
            title: title.into(),
            template_type: template_type.into(),
            slide_data: slides,
            status: CarouselStatus::Draft,
            custom_branding: None,
            pdf_generated_at: None,
            scheduled_for: None,
            linkedin_post_id: None,
            linkedin_post_url: None,
        };
        carousel.renumber();
        Ok(carousel)
    }

    pub fn with_branding(mut self, branding: BrandingOverride) -> Self {
        self.custom_branding = Some(branding);
        self
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slide_data
    }

    pub fn status(&self) -> CarouselStatus {
        self.status
    }

    /// The template the carousel renders with: registry lookup plus branding.
    pub fn effective_template(&self) -> Template {
        apply_branding_overrides(
            get_template(&self.template_type),
            self.custom_branding.as_ref(),
        )
    }

    /// True if `workspace_id` owns this carousel.
    pub fn belongs_to(&self, workspace_id: &str) -> bool {
        self.workspace_id == workspace_id
    }

    // --- Slide editing ---

    /// Inserts `slide` at `index` (clamped to the end of the deck).
    pub fn insert_slide(&mut self, index: usize, slide: Slide) -> Result<()> {
        self.ensure_editable()?;
        let index = index.min(self.slide_data.len());
        self.slide_data.insert(index, slide);
        self.renumber();
        Ok(())
    }

    pub fn push_slide(&mut self, slide: Slide) -> Result<()> {
        self.insert_slide(self.slide_data.len(), slide)
    }

    /// Removes and returns the slide at `index`. The last remaining slide cannot be removed.
    pub fn remove_slide(&mut self, index: usize) -> Result<Slide> {
        self.ensure_editable()?;
        self.ensure_index(index)?;
        if self.slide_data.len() == 1 {
            return Err(CarouselError::InvalidState(
                "Cannot delete the only slide of a carousel".to_string(),
            ));
        }
        let removed = self.slide_data.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Moves the slide at `from` so that it ends up at position `to`.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_index(from)?;
        self.ensure_index(to)?;
        let slide = self.slide_data.remove(from);
        self.slide_data.insert(to, slide);
        self.renumber();
        Ok(())
    }

    pub fn update_slide(&mut self, index: usize, edit: SlideEdit) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_index(index)?;
        edit.apply_to(&mut self.slide_data[index]);
        Ok(())
    }

    /// Rewrites every `slide_number` to its 1-based position.
    pub fn renumber(&mut self) {
        for (index, slide) in self.slide_data.iter_mut().enumerate() {
            slide.slide_number = index as u32 + 1;
        }
    }

    // --- Lifecycle ---

    /// Records a successful export. Drafts become ready; other states are kept.
    pub fn mark_exported(&mut self, at: DateTime<Utc>) {
        self.pdf_generated_at = Some(at);
        if self.status == CarouselStatus::Draft {
            self.status = CarouselStatus::Ready;
        }
    }

    pub fn mark_published(
        &mut self,
        at: DateTime<Utc>,
        post_id: Option<String>,
        post_url: Option<String>,
    ) -> Result<()> {
        if self.status == CarouselStatus::Published {
            return Err(CarouselError::InvalidState(format!(
                "Carousel {} is already published",
                self.id
            )));
        }
        self.status = CarouselStatus::Published;
        self.pdf_generated_at = Some(at);
        self.scheduled_for = None;
        self.linkedin_post_id = post_id;
        self.linkedin_post_url = post_url;
        Ok(())
    }

    /// Queues the carousel for publishing at `at`, which must lie after `now`.
    pub fn schedule(&mut self, at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
        match self.status {
            CarouselStatus::Draft | CarouselStatus::Ready => {}
            other => {
                return Err(CarouselError::InvalidState(format!(
                    "Cannot schedule a {} carousel",
                    other.as_str()
                )))
            }
        }
        if at <= now {
            return Err(CarouselError::InvalidInput(format!(
                "Scheduled time {} is not in the future",
                at.to_rfc3339()
            )));
        }
        self.status = CarouselStatus::Scheduled;
        self.scheduled_for = Some(at);
        Ok(())
    }

    pub fn unschedule(&mut self) -> Result<()> {
        if self.status != CarouselStatus::Scheduled {
            return Err(CarouselError::InvalidState(format!(
                "Cannot unschedule a {} carousel",
                self.status.as_str()
            )));
        }
        self.status = CarouselStatus::Draft;
        self.scheduled_for = None;
        Ok(())
    }

    /// Reopens a ready or scheduled carousel for editing.
    pub fn revert_to_draft(&mut self) -> Result<()> {
        match self.status {
            CarouselStatus::Draft => Ok(()),
            CarouselStatus::Ready | CarouselStatus::Scheduled => {
                self.status = CarouselStatus::Draft;
                self.scheduled_for = None;
                Ok(())
            }
            CarouselStatus::Published => Err(CarouselError::InvalidState(
                "A published carousel cannot be edited".to_string(),
            )),
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.status != CarouselStatus::Draft {
            return Err(CarouselError::InvalidState(format!(
                "Slides can only be edited on a draft carousel (status is {})",
                self.status.as_str()
            )));
        }
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> Result<()> {
        if index >= self.slide_data.len() {
            return Err(CarouselError::InvalidInput(format!(
                "Slide index {} out of range (carousel has {} slides)",
                index,
                self.slide_data.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn deck(titles: &[&str]) -> Carousel {
        let slides = titles.iter().map(|t| Slide::new(*t, "")).collect();
        Carousel::new("c1", "ws1", "Deck", "minimal", slides).expect("non-empty deck")
    }

    fn numbers(carousel: &Carousel) -> Vec<u32> {
        carousel.slides().iter().map(|s| s.slide_number).collect()
    }

    fn titles(carousel: &Carousel) -> Vec<&str> {
        carousel.slides().iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_new_rejects_empty_and_renumbers() {
        assert!(matches!(
            Carousel::new("c", "w", "t", "minimal", vec![]),
            Err(CarouselError::InvalidInput(_))
        ));

        let mut slide = Slide::new("a", "");
        slide.slide_number = 7;
        let carousel = Carousel::new("c", "w", "t", "minimal", vec![slide]).expect("one slide");
        assert_eq!(numbers(&carousel), vec![1]);
        assert_eq!(carousel.status(), CarouselStatus::Draft);
    }

    #[test]
    fn test_insert_move_remove_keep_numbering() {
        let mut carousel = deck(&["a", "b", "c"]);

        carousel.insert_slide(1, Slide::new("x", "")).expect("insert");
        assert_eq!(titles(&carousel), vec!["a", "x", "b", "c"]);
        assert_eq!(numbers(&carousel), vec![1, 2, 3, 4]);

        carousel.insert_slide(99, Slide::new("end", "")).expect("insert clamps");
        assert_eq!(titles(&carousel).last(), Some(&"end"));

        carousel.move_slide(0, 3).expect("move");
        assert_eq!(titles(&carousel), vec!["x", "b", "c", "a", "end"]);
        assert_eq!(numbers(&carousel), vec![1, 2, 3, 4, 5]);

        let removed = carousel.remove_slide(1).expect("remove");
        assert_eq!(removed.title, "b");
        assert_eq!(numbers(&carousel), vec![1, 2, 3, 4]);

        assert!(matches!(
            carousel.move_slide(0, 10),
            Err(CarouselError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cannot_remove_last_slide() {
        let mut carousel = deck(&["only"]);
        assert!(matches!(
            carousel.remove_slide(0),
            Err(CarouselError::InvalidState(_))
        ));
        assert_eq!(carousel.slides().len(), 1);
    }

    #[test]
    fn test_editing_requires_draft() {
        let mut carousel = deck(&["a", "b"]);
        carousel.mark_exported(Utc::now());
        assert_eq!(carousel.status(), CarouselStatus::Ready);
        assert!(carousel.push_slide(Slide::new("c", "")).is_err());
        assert!(carousel
            .update_slide(0, SlideEdit::default())
            .is_err());

        carousel.revert_to_draft().expect("ready can be reopened");
        carousel.push_slide(Slide::new("c", "")).expect("editable again");
        assert_eq!(numbers(&carousel), vec![1, 2, 3]);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let now = Utc::now();
        let mut carousel = deck(&["a"]);

        assert!(carousel.schedule(now - Duration::hours(1), now).is_err());
        carousel
            .schedule(now + Duration::hours(1), now)
            .expect("future schedule");
        assert_eq!(carousel.status(), CarouselStatus::Scheduled);

        // Exporting a scheduled carousel must not downgrade it.
        carousel.mark_exported(now);
        assert_eq!(carousel.status(), CarouselStatus::Scheduled);
        assert_eq!(carousel.pdf_generated_at, Some(now));

        carousel.unschedule().expect("unschedule");
        assert_eq!(carousel.status(), CarouselStatus::Draft);
        assert_eq!(carousel.scheduled_for, None);

        carousel
            .mark_published(now, Some("urn:li:share:1".into()), None)
            .expect("publish");
        assert_eq!(carousel.status(), CarouselStatus::Published);
        assert!(carousel.mark_published(now, None, None).is_err());
        assert!(carousel.revert_to_draft().is_err());
        assert!(carousel.schedule(now + Duration::hours(1), now).is_err());
    }

    #[test]
    fn test_carousel_json_shape() {
        let json = r##"{
            "id": "c9",
            "workspace_id": "ws",
            "title": "From the database",
            "template_type": "bold",
            "slide_data": [
                {"slide_number": 1, "title": "Hello", "body": "World", "key_point": ""}
            ],
            "status": "draft",
            "custom_branding": {"primary_color": "#ABCDEF"}
        }"##;
        let carousel: Carousel = serde_json::from_str(json).expect("valid carousel");
        assert_eq!(carousel.status(), CarouselStatus::Draft);
        assert_eq!(carousel.slides()[0].title, "Hello");
        let style = carousel.effective_template();
        assert_eq!(style.id, "bold");
        assert_eq!(style.colors.primary, "#ABCDEF");
    }

    fn stored(slide_data: &str) -> String {
        format!(
            r#"{{"id":"c1","workspace_id":"ws","title":"t","template_type":"minimal","status":"ready","slide_data":{}}}"#,
            slide_data
        )
    }

    #[test]
    fn test_stored_carousel_without_slides_is_rejected() {
        let result = serde_json::from_str::<Carousel>(&stored("[]"));
        let error = result.expect_err("empty slide_data must not load");
        assert!(error.to_string().contains("at least one slide"), "{}", error);
    }

    #[test]
    fn test_stored_carousel_is_renumbered() {
        let carousel: Carousel = serde_json::from_str(&stored(
            r#"[{"slide_number":5,"title":"a"},{"slide_number":5,"title":"b"}]"#,
        ))
        .expect("valid carousel");
        assert_eq!(numbers(&carousel), vec![1, 2]);
        assert_eq!(titles(&carousel), vec!["a", "b"]);
        assert_eq!(carousel.status(), CarouselStatus::Ready);

        let round_trip: Carousel =
            serde_json::from_str(&serde_json::to_string(&carousel).expect("serialize"))
                .expect("deserialize");
        assert_eq!(round_trip, carousel);
    }
}
