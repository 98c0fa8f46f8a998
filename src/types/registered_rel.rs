//! Link relation types from the IANA registry.

use std::fmt;

macro_rules! registered_rels {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, )+) => {
        /// A link relation type registered with IANA.
        ///
        /// Snapshot of the [IANA Link Relation Types] registry taken on
        /// 2015-01-21, plus `curies`, which HAL reserves for its CURIE
        /// definitions.
        ///
        /// Registered names are compared exactly: [`RegisteredRel::from_name`]
        /// only recognizes the lowercase spelling. Mixed-case names still
        /// compare equal once wrapped in a [`Rel`](crate::Rel).
        ///
        /// [IANA Link Relation Types]: http://www.iana.org/assignments/link-relations/link-relations.xhtml
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        pub enum RegisteredRel {
            $( $(#[$doc])* $variant, )+
        }

        impl RegisteredRel {
            /// Every registered relation, in registry order.
            pub const ALL: &'static [RegisteredRel] = &[ $( RegisteredRel::$variant, )+ ];

            /// Returns the registered relation name.
            pub fn name(&self) -> &'static str {
                match self {
                    $( RegisteredRel::$variant => $name, )+
                }
            }

            /// Looks a relation up by its exact registered name.
            ///
            /// # Example
            ///
            /// ```rust
            /// use hapi_client::RegisteredRel;
            ///
            /// assert_eq!(RegisteredRel::from_name("next"), Some(RegisteredRel::Next));
            /// assert_eq!(RegisteredRel::from_name("create-form"), Some(RegisteredRel::CreateForm));
            /// assert_eq!(RegisteredRel::from_name("NEXT"), None);
            /// ```
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(RegisteredRel::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

registered_rels! {
    /// Reserved by HAL for CURIE definitions.
    Curies => "curies",
    /// Refers to a resource that is the subject of the link's context.
    About => "about",
    /// Refers to a substitute for this context.
    Alternate => "alternate",
    /// Refers to an appendix.
    Appendix => "appendix",
    /// Refers to a collection of records, documents, or other materials of historical interest.
    Archives => "archives",
    /// Refers to the context's author.
    Author => "author",
    /// Gives a permanent link to use for bookmarking purposes.
    Bookmark => "bookmark",
    /// Designates the preferred version of a resource.
    Canonical => "canonical",
    /// Refers to a chapter in a collection of resources.
    Chapter => "chapter",
    /// The target resource represents a collection of which the context is a member.
    Collection => "collection",
    /// Refers to a table of contents.
    Contents => "contents",
    /// Refers to a copyright statement that applies to the link's context.
    Copyright => "copyright",
    /// The target IRI points to a resource where a submission form can be obtained.
    CreateForm => "create-form",
    /// Refers to a resource containing the most recent item(s) in a collection.
    Current => "current",
    /// Refers to a resource from which the context was derived.
    DerivedFrom => "derivedfrom",
    /// Refers to a resource providing information about the link's context.
    DescribedBy => "describedby",
    /// The relationship A 'describes' B asserts that resource A provides a description of resource B.
    Describes => "describes",
    /// Refers to a list of patent disclosures made with respect to material for which 'disclosure' relation is specified.
    Disclosure => "disclosure",
    /// Refers to a resource whose available representations are byte-for-byte identical.
    Duplicate => "duplicate",
    /// Refers to a resource that can be used to edit the link's context.
    Edit => "edit",
    /// The target IRI points to a resource where a submission form for editing can be obtained.
    EditForm => "edit-form",
    /// Refers to a resource that can be used to edit media associated with the link's context.
    EditMedia => "edit-media",
    /// Identifies a related resource that is potentially large and might require special handling.
    Enclosure => "enclosure",
    /// An IRI that refers to the furthest preceding resource in a series of resources.
    First => "first",
    /// Refers to a glossary of terms.
    Glossary => "glossary",
    /// Refers to context-sensitive help.
    Help => "help",
    /// Refers to a resource hosted by the server indicated by the link context.
    Hosts => "hosts",
    /// Refers to a hub that enables registration for notification of updates to the context.
    Hub => "hub",
    /// Refers to an icon representing the link's context.
    Icon => "icon",
    /// Refers to an index.
    Index => "index",
    /// The target resource is a member of the collection represented by the context.
    Item => "item",
    /// An IRI that refers to the furthest following resource in a series of resources.
    Last => "last",
    /// Points to a resource containing the latest version.
    LatestVersion => "latest-version",
    /// Refers to a license associated with this context.
    License => "license",
    /// Refers to further information about the link's context, expressed as a LRDD document.
    Lrdd => "lrdd",
    /// The target resource is a Memento.
    Memento => "memento",
    /// Refers to a resource that can be used to monitor changes in an HTTP resource.
    Monitor => "monitor",
    /// Refers to a resource that can be used to monitor changes in a specified group of HTTP resources.
    MonitorGroup => "monitor-group",
    /// Indicates that the link's context is a part of a series, and that the next in the series is the link target.
    Next => "next",
    /// Refers to the immediately following archive resource.
    NextArchive => "next-archive",
    /// Indicates that the context's original author or publisher does not endorse the link target.
    NoFollow => "nofollow",
    /// Indicates that no referrer information is to be leaked when following the link.
    NoReferrer => "noreferrer",
    /// The target resource is an Original Resource.
    Original => "original",
    /// Indicates a resource where payment is accepted.
    Payment => "payment",
    /// Points to a resource containing the predecessor version in the version history.
    PredecessorVersion => "predecessor-version",
    /// Indicates that the link target should be preemptively cached.
    Prefetch => "prefetch",
    /// Indicates that the link's context is a part of a series, and that the previous in the series is the link target.
    Prev => "prev",
    /// Refers to a resource that provides a preview of the link's context.
    Preview => "preview",
    /// Refers to the previous resource in an ordered series of resources. Synonym for "prev".
    Previous => "previous",
    /// Refers to the immediately preceding archive resource.
    PrevArchive => "prev-archive",
    /// Refers to a privacy policy associated with the link's context.
    PrivacyPolicy => "privacy-policy",
    /// Identifying that a resource representation conforms to a certain profile.
    Profile => "profile",
    /// Identifies a related resource.
    Related => "related",
    /// Identifies a resource that is a reply to the context of the link.
    Replies => "replies",
    /// Refers to a resource that can be used to search through the link's context and related resources.
    Search => "search",
    /// Refers to a section in a collection of resources.
    Section => "section",
    /// Conveys an identifier for the link's context.
    SelfRel => "self",
    /// Indicates a URI that can be used to retrieve a service document.
    Service => "service",
    /// Refers to the first resource in a collection of resources.
    Start => "start",
    /// Refers to a stylesheet.
    Stylesheet => "stylesheet",
    /// Refers to a resource serving as a subsection in a collection of resources.
    Subsection => "subsection",
    /// Points to a resource containing the successor version in the version history.
    SuccessorVersion => "successor-version",
    /// Gives a tag (identified by the given address) that applies to the current document.
    Tag => "tag",
    /// Refers to the terms of service associated with the link's context.
    TermsOfService => "terms-of-service",
    /// The target resource is a TimeGate for an Original Resource.
    TimeGate => "timegate",
    /// The target resource is a TimeMap for an Original Resource.
    TimeMap => "timemap",
    /// Refers to a resource identifying the abstract semantic type of which the link's context is considered to be an instance.
    Type => "type",
    /// Refers to a parent document in a hierarchy of documents.
    Up => "up",
    /// Points to a resource containing the version history for the context.
    VersionHistory => "version-history",
    /// Identifies a resource that is the source of the information in the link's context.
    Via => "via",
    /// Points to a working copy for this resource.
    WorkingCopy => "working-copy",
    /// Points to the versioned resource from which this working copy was obtained.
    WorkingCopyOf => "working-copy-of",
}

impl fmt::Display for RegisteredRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::*;

    #[test_case("self", RegisteredRel::SelfRel)]
    #[test_case("next", RegisteredRel::Next)]
    #[test_case("curies", RegisteredRel::Curies)]
    #[test_case("working-copy-of", RegisteredRel::WorkingCopyOf)]
    #[test_case("derivedfrom", RegisteredRel::DerivedFrom)]
    fn test_from_name(name: &str, expected: RegisteredRel) {
        assert_eq!(RegisteredRel::from_name(name), Some(expected));
        assert_eq!(expected.name(), name);
    }

    #[test_case("Self" ; "capitalized")]
    #[test_case(" next" ; "leading space")]
    #[test_case("https://api.example.com/alps#get-orders" ; "uri")]
    #[test_case("" ; "empty")]
    fn test_from_name_unknown(name: &str) {
        assert_eq!(RegisteredRel::from_name(name), None);
    }

    #[test]
    fn test_names_are_unique_and_lowercase() {
        let names: HashSet<_> = RegisteredRel::ALL.iter().map(RegisteredRel::name).collect();
        assert_eq!(names.len(), RegisteredRel::ALL.len());
        for name in names {
            assert_eq!(name, name.to_ascii_lowercase());
            assert_eq!(RegisteredRel::from_name(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(RegisteredRel::CreateForm.to_string(), "create-form");
    }
}
