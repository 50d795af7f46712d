//! Proof-script command statistics: counting, combining, grouping.

use std::collections::BTreeMap;

use phf::phf_set;

use crate::jml::FilteredAnnotation;

/// The closed vocabulary of proof-script commands recognized inside
/// `assert ... \by` annotations. Case-sensitive, not user-extensible.
pub static VALID_COMMANDS: phf::Set<&'static str> = phf_set! {
    "oss",
    "macro",
    "rule",
    "expand",
    "witness",
    "auto",
    "tryclose",
    "cut",
    "assert",
    "leave",
    "cheat",
    "let",
};

/// The vocabulary in lexicographic order, the order of the report columns.
pub fn sorted_commands(commands: &phf::Set<&'static str>) -> Vec<&'static str> {
    let mut sorted: Vec<&'static str> = commands.iter().copied().collect();
    sorted.sort_unstable();
    sorted
}

/// Command counts for one annotation, or aggregated over a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStat {
    /// The counted annotation; `None` for an aggregate over several.
    pub annotation: Option<FilteredAnnotation>,
    /// Occurrences per command. Absent commands read as zero.
    pub counts: BTreeMap<&'static str, u32>,
}

impl ScriptStat {
    /// No annotation, every count zero: the identity of [`combine`].
    pub fn empty() -> Self {
        ScriptStat {
            annotation: None,
            counts: BTreeMap::new(),
        }
    }

    /// The count for one command, zero when absent.
    pub fn count(&self, command: &str) -> u32 {
        self.counts.get(command).copied().unwrap_or(0)
    }
}

/// Count, per vocabulary command, the lines of the filtered content that
/// start with it.
///
/// Each line is trimmed and one leading `@` continuation marker is stripped
/// without re-trimming, so `@cut` counts under `cut` and `@ cut` does not.
/// Every command is tested against every line independently, and a textual
/// prefix is enough: `assertfoo` counts under `assert`, and a line could
/// count under two commands if the vocabulary ever contained one word that
/// prefixes another. Only applied to `assert \by` script annotations.
pub fn count_commands(
    annotation: &FilteredAnnotation,
    commands: &phf::Set<&'static str>,
) -> ScriptStat {
    let mut counts = BTreeMap::new();
    for line in annotation.content.lines() {
        let trimmed = line.trim();
        let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed);
        for &command in commands.iter() {
            if stripped.starts_with(command) {
                *counts.entry(command).or_insert(0) += 1;
            }
        }
    }
    ScriptStat {
        annotation: Some(annotation.clone()),
        counts,
    }
}

/// Key-wise sum of two stats. The result is an aggregate, so it carries no
/// annotation of its own.
pub fn combine(a: &ScriptStat, b: &ScriptStat) -> ScriptStat {
    let mut counts = a.counts.clone();
    for (&command, &n) in &b.counts {
        *counts.entry(command).or_insert(0) += n;
    }
    ScriptStat {
        annotation: None,
        counts,
    }
}

/// Fold stats into one aggregate. Associative and commutative with
/// [`ScriptStat::empty`] as identity, so input order never changes the
/// result and an empty input yields an aggregate whose every lookup is zero.
pub fn accumulate<'a, I>(stats: I) -> ScriptStat
where
    I: IntoIterator<Item = &'a ScriptStat>,
{
    stats
        .into_iter()
        .fold(ScriptStat::empty(), |acc, s| combine(&acc, s))
}

/// The stats whose annotation's method signature starts with `prefix`.
/// Membership is not exclusive: overlapping prefixes select the same stat
/// into several groups.
pub fn select_group<'a>(stats: &'a [ScriptStat], prefix: &str) -> Vec<&'a ScriptStat> {
    stats
        .iter()
        .filter(|s| {
            s.annotation
                .as_ref()
                .map(|a| a.signature().starts_with(prefix))
                .unwrap_or(false)
        })
        .collect()
}

/// Aggregated counts for one method group.
#[derive(Debug, Clone)]
pub struct GroupStat {
    /// The group's prefix string, used as its display name.
    pub method: String,
    /// Number of contributing proof scripts.
    pub scripts: usize,
    /// Key-wise sum over the group's members.
    pub total: ScriptStat,
}

/// Aggregate `stats` under each group prefix, preserving the group order.
/// Every group appears in the result, all-zero when nothing matched.
pub fn group_stats(stats: &[ScriptStat], groups: &[String]) -> Vec<GroupStat> {
    groups
        .iter()
        .map(|prefix| {
            let members = select_group(stats, prefix);
            GroupStat {
                method: prefix.clone(),
                scripts: members.len(),
                total: accumulate(members),
            }
        })
        .collect()
}
