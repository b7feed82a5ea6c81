//! Namespace alias scopes for template attributes.
use std::{borrow::Cow, collections::HashMap, sync::Arc};

/// Namespace URI of TAL statements (`tal:content`, `tal:repeat`, ...).
pub const NAMESPACE_TAL: &str = "http://xml.zope.org/namespaces/tal";

/// Namespace URI of METAL macros (`metal:define-macro`, ...).
pub const NAMESPACE_METAL: &str = "http://xml.zope.org/namespaces/metal";

/// Namespace URI of i18n attributes (`i18n:translate`, ...).
pub const NAMESPACE_I18N: &str = "http://xml.zope.org/namespaces/i18n";

/// Namespace URI of PHPTAL extension attributes (`phptal:cache`, ...).
pub const NAMESPACE_PHPTAL: &str = "http://phptal.motion-twin.com/phptal";

const XMLNS_ATTRIBUTE_PREFIX: &str = "xmlns:";

/// The template namespaces a parser recognises, keyed by URI.
///
/// Each namespace has a canonical prefix. Attribute queries are written with the canonical prefix
/// (`tal:content`), whatever alias the template author bound to the URI.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceRegistry {
    namespaces: HashMap<String, String>,
}
impl NamespaceRegistry {
    /// Create a registry with no namespaces at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            namespaces: HashMap::new(),
        }
    }

    /// Register a namespace URI under a canonical prefix, replacing any previous entry for the URI.
    #[must_use]
    pub fn with_namespace(mut self, uri: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.namespaces.insert(uri.into(), canonical.into());
        self
    }

    /// Returns the canonical prefix of a namespace URI, if it is a template namespace.
    #[must_use]
    pub fn canonical(&self, uri: &str) -> Option<&str> {
        self.namespaces.get(uri).map(String::as_str)
    }

    /// Returns the number of registered namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns true if no namespace is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::empty()
            .with_namespace(NAMESPACE_TAL, "tal")
            .with_namespace(NAMESPACE_METAL, "metal")
            .with_namespace(NAMESPACE_I18N, "i18n")
            .with_namespace(NAMESPACE_PHPTAL, "phptal")
    }
}

/// A snapshot of the namespace aliases in scope at one point of a template.
///
/// States are persistent: deriving a new state never changes an existing one, and cloning only
/// bumps a reference count. An element can therefore keep the state that was valid where it was
/// parsed, while its children declare further aliases.
///
/// Equality is structural over the scope chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlnsState {
    scope: Option<Arc<Scope>>,
}

#[derive(Debug, PartialEq)]
struct Scope {
    aliases: HashMap<String, String>,
    parent: Option<Arc<Scope>>,
}

impl XmlnsState {
    /// Create a state with no aliases; [`XmlnsState::unalias`] is then the identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new state where `prefix` is an alias for the `canonical` prefix.
    #[must_use]
    pub fn with_alias(&self, prefix: impl Into<String>, canonical: impl Into<String>) -> Self {
        let aliases = HashMap::from([(prefix.into(), canonical.into())]);
        self.push(aliases)
    }

    /// Returns the state for an element carrying `attributes`.
    ///
    /// Every `xmlns:alias="uri"` attribute whose URI is known to `registry` binds `alias` to the
    /// canonical prefix of that namespace. Other attributes, and declarations of unknown URIs, are
    /// ignored. If nothing is bound, the returned state shares this one's scope.
    ///
    /// Rebinding an alias to an unknown URI does not hide an outer binding of the same alias.
    #[must_use]
    pub fn declare<'a>(
        &self,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
        registry: &NamespaceRegistry,
    ) -> Self {
        let aliases: HashMap<String, String> = attributes
            .into_iter()
            .filter_map(|(key, uri)| {
                let alias = key.strip_prefix(XMLNS_ATTRIBUTE_PREFIX)?;
                let canonical = registry.canonical(uri)?;
                Some((alias.to_string(), canonical.to_string()))
            })
            .collect();

        if aliases.is_empty() {
            return self.clone();
        }

        tracing::trace!(?aliases, "namespace aliases declared");
        self.push(aliases)
    }

    /// Returns the canonical prefix bound to `prefix`, searching from the innermost scope out.
    #[must_use]
    pub fn canonical(&self, prefix: &str) -> Option<&str> {
        let mut scope = self.scope.as_deref();
        while let Some(current) = scope {
            if let Some(canonical) = current.aliases.get(prefix) {
                return Some(canonical.as_str());
            }
            scope = current.parent.as_deref();
        }
        None
    }

    /// Rewrite a raw `prefix:local` attribute name to its canonical spelling.
    ///
    /// Names without a prefix, or whose prefix is not an alias, are returned unchanged.
    #[must_use]
    pub fn unalias<'a>(&self, key: &'a str) -> Cow<'a, str> {
        let Some((prefix, local)) = key.split_once(':') else {
            return Cow::Borrowed(key);
        };

        match self.canonical(prefix) {
            Some(canonical) if canonical != prefix => Cow::Owned(format!("{canonical}:{local}")),
            _ => Cow::Borrowed(key),
        }
    }

    /// Returns true if no alias is in scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scope.is_none()
    }

    /// Returns true if both states share the same scope chain.
    #[must_use]
    pub fn shares_scope(&self, other: &Self) -> bool {
        match (&self.scope, &other.scope) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn push(&self, aliases: HashMap<String, String>) -> Self {
        Self {
            scope: Some(Arc::new(Scope {
                aliases,
                parent: self.scope.clone(),
            })),
        }
    }
}
