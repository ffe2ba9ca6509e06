use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional editing capabilities of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extension {
    Bold,
    Italic,
    Underline,
    Strike,
    Heading,
    BulletList,
    OrderedList,
    TaskList,
    TextAlign,
    Link,
    Image,
    CodeBlock,
}

impl Extension {
    pub const ALL: [Extension; 12] = [
        Extension::Bold,
        Extension::Italic,
        Extension::Underline,
        Extension::Strike,
        Extension::Heading,
        Extension::BulletList,
        Extension::OrderedList,
        Extension::TaskList,
        Extension::TextAlign,
        Extension::Link,
        Extension::Image,
        Extension::CodeBlock,
    ];
}

/// Fixed set of enabled extensions, assembled once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionSet(BTreeSet<Extension>);

impl ExtensionSet {
    /// Every extension
    pub fn all() -> Self {
        Self(Extension::ALL.into_iter().collect())
    }

    /// Basic formatting, headings, bullet/ordered lists and code blocks
    pub fn starter_kit() -> Self {
        Self::from_iter([
            Extension::Bold,
            Extension::Italic,
            Extension::Strike,
            Extension::Heading,
            Extension::BulletList,
            Extension::OrderedList,
            Extension::CodeBlock,
        ])
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, extension: Extension) -> bool {
        self.0.contains(&extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = Extension> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Extension> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = Extension>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::all()
    }
}
