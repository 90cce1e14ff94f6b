#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of string values accepted at the API boundary.
///
/// The validator uses `ALL` to build its "Invalid enum value" messages, so the
/// order of the list is the order in which options are reported to users.
pub trait Choice: Copy + Sized + 'static {
    /// Every accepted value, in declaration order.
    const ALL: &'static [Self];

    /// Wire representation of this value.
    fn as_str(&self) -> &'static str;

    fn from_choice(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// `'a' | 'b' | 'c'`
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("'{}'", c.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Error when parsing a string that is not one of a [`Choice`]'s values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceError {
    kind: &'static str,
    invalid: String,
    expected: String,
}

impl fmt::Display for ParseChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.kind, self.invalid, self.expected
        )
    }
}

impl std::error::Error for ParseChoiceError {}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_choice(s).ok_or_else(|| ParseChoiceError {
                    kind: $kind,
                    invalid: s.to_string(),
                    expected: Self::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    };
}

choice_enum! {
    /// Voice the generated post should be written in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
    #[cfg_attr(
        feature = "sea-orm",
        derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
        sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
    )]
    pub enum BlogTone ("tone") {
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "professional"))]
        Professional => "professional",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "casual"))]
        Casual => "casual",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "friendly"))]
        Friendly => "friendly",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "authoritative"))]
        Authoritative => "authoritative",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "conversational"))]
        Conversational => "conversational",
    }
}

choice_enum! {
    /// Structure of the generated post.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
    #[cfg_attr(
        feature = "sea-orm",
        derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
        sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
    )]
    pub enum BlogStyle ("style") {
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "informative"))]
        Informative => "informative",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "storytelling"))]
        Storytelling => "storytelling",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "how-to"))]
        HowTo => "how-to",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "listicle"))]
        Listicle => "listicle",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "case-study"))]
        CaseStudy => "case-study",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
    #[cfg_attr(
        feature = "sea-orm",
        derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
        sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
    )]
    pub enum BlogLength ("length") {
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "short"))]
        Short => "short",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "medium"))]
        Medium => "medium",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "long"))]
        Long => "long",
    }
}

choice_enum! {
    /// Publication state of a blog. Any transition between states is allowed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
    #[cfg_attr(
        feature = "sea-orm",
        derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
        sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
    )]
    pub enum BlogStatus ("status") {
        #[default]
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "draft"))]
        Draft => "draft",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "published"))]
        Published => "published",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "archived"))]
        Archived => "archived",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
    #[cfg_attr(
        feature = "sea-orm",
        derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
        sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
    )]
    pub enum MediaKind ("media type") {
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "image"))]
        Image => "image",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "video"))]
        Video => "video",
        #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "document"))]
        Document => "document",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum Theme ("theme") {
        Light => "light",
        Dark => "dark",
        System => "system",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum ImageStyle ("image style") {
        Realistic => "realistic",
        Artistic => "artistic",
        Minimal => "minimal",
        Vintage => "vintage",
        Modern => "modern",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum AspectRatio ("aspect ratio") {
        Square => "1:1",
        Widescreen => "16:9",
        Standard => "4:3",
        Classic => "3:2",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum ImageQuality ("image quality") {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

choice_enum! {
    /// What an AI generation request should produce.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum GenerationKind ("generation type") {
        Outline => "outline",
        FullBlog => "full-blog",
        Enhance => "enhance",
        SeoOptimize => "seo-optimize",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum SortField ("sort field") {
        Title => "title",
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Status => "status",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum SortOrder ("sort order") {
        Asc => "asc",
        Desc => "desc",
    }
}

choice_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
    pub enum ExportFormat ("export format") {
        Markdown => "markdown",
        Html => "html",
        Pdf => "pdf",
        Docx => "docx",
    }
}
