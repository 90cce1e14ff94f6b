//! Request schemas shared by the API and the browser forms.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Fields, Schema, Text};
use crate::content::{
    AspectRatio, BlogLength, BlogStatus, BlogStyle, BlogTone, ExportFormat, GenerationKind,
    ImageQuality, ImageStyle, MediaKind, SortField, SortOrder, Theme,
};
use crate::outline::Outline;

const NAME: Text = Text::any()
    .min(2, "Name must be at least 2 characters")
    .max(100, "Name must be less than 100 characters");
const TITLE: Text = Text::any()
    .min(5, "Title must be at least 5 characters")
    .max(200, "Title must be less than 200 characters");
const TOPIC: Text = Text::any()
    .min(10, "Topic must be at least 10 characters")
    .max(500, "Topic must be less than 500 characters");
const SEO_TITLE: Text = Text::any().max(60, "SEO title must be less than 60 characters");
const SEO_DESCRIPTION: Text =
    Text::any().max(160, "SEO description must be less than 160 characters");

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl Schema for UserProfile {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", NAME);
        let email = f.text("email", Text::any().email("Invalid email address"));
        let image = f.optional_text("image", Text::any().url("Invalid image URL"));
        Some(Self {
            name: name?,
            email: email?,
            image: image?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub marketing: bool,
}

impl Schema for NotificationSettings {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let email = f.flag_or("email", true);
        let push = f.flag_or("push", false);
        let marketing = f.flag_or("marketing", false);
        Some(Self {
            email: email?,
            push: push?,
            marketing: marketing?,
        })
    }
}

/// Defaults pre-filled into the blog creation form.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentPreferences {
    pub default_tone: BlogTone,
    pub default_style: BlogStyle,
    pub default_length: BlogLength,
}

impl Schema for ContentPreferences {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let default_tone = f.choice_or("defaultTone", BlogTone::Professional);
        let default_style = f.choice_or("defaultStyle", BlogStyle::Informative);
        let default_length = f.choice_or("defaultLength", BlogLength::Medium);
        Some(Self {
            default_tone: default_tone?,
            default_style: default_style?,
            default_length: default_length?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UserSettings {
    pub theme: Theme,
    pub language: String,
    pub notifications: NotificationSettings,
    pub preferences: ContentPreferences,
}

impl Schema for UserSettings {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let theme = f.choice_or("theme", Theme::System);
        let language = f.text_or("language", Text::any(), "en");
        let notifications = f.nested("notifications");
        let preferences = f.nested("preferences");
        Some(Self {
            theme: theme?,
            language: language?,
            notifications: notifications?,
            preferences: preferences?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreation {
    #[schema(example = "Test Blog Post")]
    pub title: String,
    #[schema(example = "Testing the new validation and database utilities")]
    pub topic: String,
    pub tone: BlogTone,
    pub style: BlogStyle,
    pub length: BlogLength,
    pub brand_voice: Option<String>,
    pub target_audience: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl Schema for BlogCreation {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let title = f.text("title", TITLE);
        let topic = f.text("topic", TOPIC);
        let tone = f.choice("tone");
        let style = f.choice("style");
        let length = f.choice("length");
        let brand_voice = f.optional_text("brandVoice", Text::any());
        let target_audience = f.optional_text("targetAudience", Text::any());
        let keywords = f.optional_string_list("keywords");
        Some(Self {
            title: title?,
            topic: topic?,
            tone: tone?,
            style: style?,
            length: length?,
            brand_voice: brand_voice?,
            target_audience: target_audience?,
            keywords: keywords?,
        })
    }
}

/// Partial update of a blog. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub outline: Option<Outline>,
    pub status: Option<BlogStatus>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Schema for BlogUpdate {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let title = f.optional_text("title", TITLE);
        let topic = f.optional_text("topic", TOPIC);
        let content = f.optional_text("content", Text::any());
        let outline = match f.raw("outline") {
            None => Some(None),
            Some(value) => match Outline::from_input(value) {
                Ok(outline) => Some(Some(outline)),
                Err(message) => {
                    f.fail("outline", message);
                    None
                }
            },
        };
        let status = f.optional_choice("status");
        let seo_title = f.optional_text("seoTitle", SEO_TITLE);
        let seo_description = f.optional_text("seoDescription", SEO_DESCRIPTION);
        let tags = f.optional_string_list("tags");
        Some(Self {
            title: title?,
            topic: topic?,
            content: content?,
            outline: outline?,
            status: status?,
            seo_title: seo_title?,
            seo_description: seo_description?,
            tags: tags?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPublish {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub publish_date: Option<DateTime<Utc>>,
    pub featured: bool,
}

impl Schema for BlogPublish {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let seo_title = f.optional_text("seoTitle", SEO_TITLE);
        let seo_description = f.optional_text("seoDescription", SEO_DESCRIPTION);
        let tags = f.optional_string_list("tags");
        let publish_date = f.optional_datetime("publishDate");
        let featured = f.flag_or("featured", false);
        Some(Self {
            seo_title: seo_title?,
            seo_description: seo_description?,
            tags: tags?,
            publish_date: publish_date?,
            featured: featured?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct GenerationOptions {
    pub tone: Option<BlogTone>,
    pub style: Option<BlogStyle>,
    pub length: Option<BlogLength>,
    pub language: String,
}

impl Schema for GenerationOptions {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let tone = f.optional_choice("tone");
        let style = f.optional_choice("style");
        let length = f.optional_choice("length");
        let language = f.text_or("language", Text::any(), "en");
        Some(Self {
            tone: tone?,
            style: style?,
            length: length?,
            language: language?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiGeneration {
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    pub blog_id: Option<String>,
    pub prompt: String,
    pub options: Option<GenerationOptions>,
}

impl Schema for AiGeneration {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let kind = f.choice("type");
        let blog_id = f.optional_text("blogId", Text::any());
        let prompt = f.text(
            "prompt",
            Text::any()
                .min(10, "Prompt must be at least 10 characters")
                .max(1000, "Prompt must be less than 1000 characters"),
        );
        let options = f.optional_nested("options");
        Some(Self {
            kind: kind?,
            blog_id: blog_id?,
            prompt: prompt?,
            options: options?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageGeneration {
    pub prompt: String,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub quality: ImageQuality,
}

impl Schema for ImageGeneration {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let prompt = f.text(
            "prompt",
            Text::any()
                .min(10, "Prompt must be at least 10 characters")
                .max(500, "Prompt must be less than 500 characters"),
        );
        let style = f.choice_or("style", ImageStyle::Realistic);
        let aspect_ratio = f.choice_or("aspectRatio", AspectRatio::Widescreen);
        let quality = f.choice_or("quality", ImageQuality::Medium);
        Some(Self {
            prompt: prompt?,
            style: style?,
            aspect_ratio: aspect_ratio?,
            quality: quality?,
        })
    }
}

/// Descriptive fields sent alongside an uploaded file.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub blog_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
}

impl Schema for MediaUpload {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let kind = f.choice("type");
        let blog_id = f.optional_text("blogId", Text::any());
        let tags = f.optional_string_list("tags");
        let description = f.optional_text(
            "description",
            Text::any().max(500, "Description must be less than 500 characters"),
        );
        Some(Self {
            kind: kind?,
            blog_id: blog_id?,
            tags: tags?,
            description: description?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Schema for DateRange {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let start = f.optional_datetime("start");
        let end = f.optional_datetime("end");
        Some(Self {
            start: start?,
            end: end?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub status: Option<BlogStatus>,
    pub tone: Option<BlogTone>,
    pub style: Option<BlogStyle>,
    pub date_range: Option<DateRange>,
}

impl Schema for SearchFilters {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let status = f.optional_choice("status");
        let tone = f.optional_choice("tone");
        let style = f.optional_choice("style");
        let date_range = f.optional_nested("dateRange");
        Some(Self {
            status: status?,
            tone: tone?,
            style: style?,
            date_range: date_range?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogSearch {
    pub query: String,
    pub filters: Option<SearchFilters>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl Schema for BlogSearch {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let query = f.text("query", Text::any().min(1, "Search query is required"));
        let filters = f.optional_nested("filters");
        let sort_by = f.choice_or("sortBy", SortField::CreatedAt);
        let sort_order = f.choice_or("sortOrder", SortOrder::Desc);
        let page = f.integer_or("page", 1, None, 1);
        let limit = f.integer_or("limit", 1, Some(100), 20);
        Some(Self {
            query: query?,
            filters: filters?,
            sort_by: sort_by?,
            sort_order: sort_order?,
            // Both are bounded below by 1 above.
            page: page? as u64,
            limit: limit? as u64,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_metadata: bool,
    pub include_images: bool,
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,
}

impl Schema for ExportOptions {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let format = f.choice("format");
        let include_metadata = f.flag_or("includeMetadata", true);
        let include_images = f.flag_or("includeImages", true);
        let custom_css = f.optional_text("customCSS", Text::any());
        Some(Self {
            format: format?,
            include_metadata: include_metadata?,
            include_images: include_images?,
            custom_css: custom_css?,
        })
    }
}

/// A trackable user action reported by the client.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UsageEventInput {
    pub action: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Map<String, Value>>,
    pub timestamp: DateTime<Utc>,
}

impl Schema for UsageEventInput {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let action = f.text("action", Text::any().min(1, "Action is required"));
        let details = f.optional_map("details");
        let timestamp = f.optional_datetime("timestamp");
        Some(Self {
            action: action?,
            details: details?,
            timestamp: timestamp?.unwrap_or_else(Utc::now),
        })
    }
}
