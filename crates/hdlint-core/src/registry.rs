//! Process-wide rule registry.
//!
//! There is one registry per rule kind, keyed by rule name. Each entry is a
//! pair of plain function pointers: one returning the rule's descriptor and
//! one constructing a fresh, unconfigured instance. Registries are created
//! lazily on first use and live for the rest of the process.
//!
//! Rules are registered by an explicit startup call, typically
//! `hdlint_rules::register_builtin_rules()`, before any configuration is
//! resolved.

use crate::rule::{
    DescribedRule, LineLintRule, LintRuleDescriptor, SyntaxTreeLintRule, TextStructureLintRule,
    TokenStreamLintRule,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Registry entry for a rule of kind `K`.
pub struct RegistryEntry<K: ?Sized> {
    /// Returns the rule's descriptor.
    pub descriptor: fn() -> LintRuleDescriptor,
    /// Constructs a fresh instance.
    pub factory: fn() -> Box<K>,
}

impl<K: ?Sized> Clone for RegistryEntry<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ?Sized> Copy for RegistryEntry<K> {}

/// A rule kind with its own registry.
///
/// Implemented for the four rule trait objects.
pub trait RuleKind: 'static {
    /// Short name of the kind, used in listings.
    const KIND: &'static str;

    /// The registry holding rules of this kind.
    fn registry() -> &'static RwLock<BTreeMap<String, RegistryEntry<Self>>>;
}

macro_rules! impl_rule_kind {
    ($rule:ident, $kind:literal) => {
        impl RuleKind for dyn $rule {
            const KIND: &'static str = $kind;

            fn registry() -> &'static RwLock<BTreeMap<String, RegistryEntry<Self>>> {
                static REGISTRY: OnceLock<RwLock<BTreeMap<String, RegistryEntry<dyn $rule>>>> =
                    OnceLock::new();
                REGISTRY.get_or_init(RwLock::default)
            }
        }
    };
}

impl_rule_kind!(LineLintRule, "line");
impl_rule_kind!(TokenStreamLintRule, "token-stream");
impl_rule_kind!(SyntaxTreeLintRule, "syntax-tree");
impl_rule_kind!(TextStructureLintRule, "text-structure");

/// Registers a rule under `descriptor().name`, replacing any previous entry.
pub fn register<K: RuleKind + ?Sized>(
    descriptor: fn() -> LintRuleDescriptor,
    factory: fn() -> Box<K>,
) {
    let name = descriptor().name.to_string();
    debug!(rule = %name, kind = K::KIND, "registering rule");
    K::registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name, RegistryEntry { descriptor, factory });
}

/// Creates a fresh instance of the rule `name`, or `None` if this kind has
/// no rule by that name.
#[must_use]
pub fn create_rule<K: RuleKind + ?Sized>(name: &str) -> Option<Box<K>> {
    let entry = K::registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .copied();
    entry.map(|entry| (entry.factory)())
}

/// Returns true if this kind has a rule named `name`.
#[must_use]
pub fn contains<K: RuleKind + ?Sized>(name: &str) -> bool {
    K::registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Names of all rules of this kind.
#[must_use]
pub fn registered_rule_names<K: RuleKind + ?Sized>() -> BTreeSet<String> {
    K::registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect()
}

/// Returns the descriptor of the rule `name`.
///
/// # Panics
///
/// Panics if this kind has no rule by that name. Check with [`contains`]
/// first.
#[must_use]
pub fn rule_description<K: RuleKind + ?Sized>(name: &str) -> LintRuleDescriptor {
    let entry = K::registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .copied();
    match entry {
        Some(entry) => (entry.descriptor)(),
        None => panic!("no {} rule named {name:?} is registered", K::KIND),
    }
}

fn boxed_line_rule<R: LineLintRule + Default + 'static>() -> Box<dyn LineLintRule> {
    Box::new(R::default())
}

fn boxed_token_stream_rule<R: TokenStreamLintRule + Default + 'static>(
) -> Box<dyn TokenStreamLintRule> {
    Box::new(R::default())
}

fn boxed_syntax_tree_rule<R: SyntaxTreeLintRule + Default + 'static>(
) -> Box<dyn SyntaxTreeLintRule> {
    Box::new(R::default())
}

fn boxed_text_structure_rule<R: TextStructureLintRule + Default + 'static>(
) -> Box<dyn TextStructureLintRule> {
    Box::new(R::default())
}

/// Registers the line rule `R`.
pub fn register_line_rule<R: LineLintRule + DescribedRule + Default + 'static>() {
    register::<dyn LineLintRule>(R::descriptor, boxed_line_rule::<R>);
}

/// Registers the token stream rule `R`.
pub fn register_token_stream_rule<R: TokenStreamLintRule + DescribedRule + Default + 'static>() {
    register::<dyn TokenStreamLintRule>(R::descriptor, boxed_token_stream_rule::<R>);
}

/// Registers the syntax tree rule `R`.
pub fn register_syntax_tree_rule<R: SyntaxTreeLintRule + DescribedRule + Default + 'static>() {
    register::<dyn SyntaxTreeLintRule>(R::descriptor, boxed_syntax_tree_rule::<R>);
}

/// Registers the text structure rule `R`.
pub fn register_text_structure_rule<
    R: TextStructureLintRule + DescribedRule + Default + 'static,
>() {
    register::<dyn TextStructureLintRule>(R::descriptor, boxed_text_structure_rule::<R>);
}

/// Returns true if any kind has a rule named `name`.
#[must_use]
pub fn is_registered_lint_rule(name: &str) -> bool {
    contains::<dyn LineLintRule>(name)
        || contains::<dyn TokenStreamLintRule>(name)
        || contains::<dyn SyntaxTreeLintRule>(name)
        || contains::<dyn TextStructureLintRule>(name)
}

/// Names of all registered rules, across kinds.
#[must_use]
pub fn all_registered_lint_rule_names() -> BTreeSet<String> {
    let mut names = registered_rule_names::<dyn LineLintRule>();
    names.extend(registered_rule_names::<dyn TokenStreamLintRule>());
    names.extend(registered_rule_names::<dyn SyntaxTreeLintRule>());
    names.extend(registered_rule_names::<dyn TextStructureLintRule>());
    names
}

/// Documentation of one registered rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRuleDescriptionEntry {
    /// The rule's descriptor.
    pub descriptor: LintRuleDescriptor,
    /// Kind of the rule.
    pub kind: &'static str,
    /// Whether the rule is part of the default rule set.
    pub default_enabled: bool,
}

fn collect_descriptions<K: RuleKind + ?Sized>(
    defaults: &BTreeSet<String>,
    into: &mut BTreeMap<String, LintRuleDescriptionEntry>,
) {
    let registry = K::registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    for (name, entry) in registry.iter() {
        into.insert(
            name.clone(),
            LintRuleDescriptionEntry {
                descriptor: (entry.descriptor)(),
                kind: K::KIND,
                default_enabled: defaults.contains(name),
            },
        );
    }
}

/// Descriptions of all registered rules, keyed by name.
#[must_use]
pub fn all_rule_descriptions() -> BTreeMap<String, LintRuleDescriptionEntry> {
    let defaults = default_rule_set();
    let mut descriptions = BTreeMap::new();
    collect_descriptions::<dyn LineLintRule>(&defaults, &mut descriptions);
    collect_descriptions::<dyn TokenStreamLintRule>(&defaults, &mut descriptions);
    collect_descriptions::<dyn SyntaxTreeLintRule>(&defaults, &mut descriptions);
    collect_descriptions::<dyn TextStructureLintRule>(&defaults, &mut descriptions);
    descriptions
}

fn default_rules() -> &'static RwLock<BTreeSet<String>> {
    static DEFAULT_RULES: OnceLock<RwLock<BTreeSet<String>>> = OnceLock::new();
    DEFAULT_RULES.get_or_init(RwLock::default)
}

/// Replaces the curated list of rules enabled by [`RuleSet::Default`].
///
/// [`RuleSet::Default`]: crate::configuration::RuleSet::Default
pub fn set_default_rule_set(names: &[&str]) {
    let mut rules = default_rules()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *rules = names.iter().map(|name| (*name).to_string()).collect();
}

/// The rules enabled by [`RuleSet::Default`].
///
/// [`RuleSet::Default`]: crate::configuration::RuleSet::Default
#[must_use]
pub fn default_rule_set() -> BTreeSet<String> {
    default_rules()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
