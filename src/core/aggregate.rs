//! Scope-aware aggregation of extracted messages.
//!
//! Batches are folded file by file into an [`Aggregate`], an explicit
//! accumulator holding exactly one surviving descriptor per identifier.
//! Each incoming descriptor produces one of three outcomes:
//!
//! - **Insert**: first occurrence of the identifier, it becomes the survivor.
//! - **Merge**: same application (or same package, for descriptors outside any
//!   application) as the survivor. Non-empty fields are copied onto the survivor.
//!   When the features differ, the survivor's feature scope is cleared.
//! - **Discard**: the identifier collides across applications or packages.
//!   The survivor keeps its fields and only gains the duplicate flag; the
//!   collision is recorded as a [`Conflict`] for review.

use std::collections::HashMap;

use tracing::debug;

use crate::core::data::{Description, FileBatch, MessageDescriptor};

/// Scope that became ambiguous when a descriptor was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemotedScope {
    App,
    Package,
}

impl DemotedScope {
    pub fn label(self) -> &'static str {
        match self {
            DemotedScope::App => "application",
            DemotedScope::Package => "package",
        }
    }
}

/// Decision taken for a single incoming descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Inserted,
    /// Folded into the survivor. `demoted_feature` is set when the two
    /// occurrences came from different features of the same application.
    Merged { demoted_feature: bool },
    Discarded { demoted: DemotedScope },
}

/// An identifier that collided across unrelated scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub id: String,
    pub scope: DemotedScope,
    /// File of the survivor at the time of the collision.
    pub kept_file: String,
    pub discarded_file: String,
}

/// Counters over every fold decision taken so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub inserted: usize,
    pub merged: usize,
    pub demoted_features: usize,
    pub discarded_apps: usize,
    pub discarded_packages: usize,
    /// Descriptors overwritten by a later one with the same id in the same file.
    pub overwritten_in_file: usize,
}

impl AggregateStats {
    pub fn duplicates(&self) -> usize {
        self.merged + self.discarded_apps + self.discarded_packages
    }

    fn record(&mut self, outcome: FoldOutcome) {
        match outcome {
            FoldOutcome::Inserted => self.inserted += 1,
            FoldOutcome::Merged { demoted_feature } => {
                self.merged += 1;
                if demoted_feature {
                    self.demoted_features += 1;
                }
            }
            FoldOutcome::Discarded {
                demoted: DemotedScope::App,
            } => self.discarded_apps += 1,
            FoldOutcome::Discarded {
                demoted: DemotedScope::Package,
            } => self.discarded_packages += 1,
        }
    }
}

/// Decide what happens to `incoming` given the current survivor for its id.
///
/// This is the whole conflict policy; it never fails.
pub fn resolve(existing: Option<&MessageDescriptor>, incoming: &MessageDescriptor) -> FoldOutcome {
    let Some(existing) = existing else {
        return FoldOutcome::Inserted;
    };

    if incoming.app_scope.is_some() {
        if existing.app_scope != incoming.app_scope {
            return FoldOutcome::Discarded {
                demoted: DemotedScope::App,
            };
        }
        return FoldOutcome::Merged {
            demoted_feature: existing.feature_scope != incoming.feature_scope,
        };
    }

    if existing.package_scope == incoming.package_scope {
        FoldOutcome::Merged {
            demoted_feature: false,
        }
    } else {
        FoldOutcome::Discarded {
            demoted: DemotedScope::Package,
        }
    }
}

trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Description {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

fn overwrite_if_meaningful<T: Blank>(target: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value.filter(|v| !v.is_blank()) {
        *target = Some(value);
    }
}

/// Copy every non-empty field of `incoming` onto `target`.
///
/// Absent values, empty strings and a `false` duplicate flag never erase
/// what `target` already holds.
pub fn merge_into(target: &mut MessageDescriptor, incoming: MessageDescriptor) {
    let MessageDescriptor {
        id,
        default_message,
        description,
        source_file,
        app_scope,
        feature_scope,
        package_scope,
        is_duplicate,
    } = incoming;

    if !id.is_empty() {
        target.id = id;
    }
    overwrite_if_meaningful(&mut target.default_message, default_message);
    overwrite_if_meaningful(&mut target.description, description);
    if !source_file.is_empty() {
        target.source_file = source_file;
    }
    overwrite_if_meaningful(&mut target.app_scope, app_scope);
    overwrite_if_meaningful(&mut target.feature_scope, feature_scope);
    overwrite_if_meaningful(&mut target.package_scope, package_scope);
    if is_duplicate {
        target.is_duplicate = true;
    }
}

/// Accumulator of surviving descriptors, keyed by id in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    messages: Vec<MessageDescriptor>,
    index: HashMap<String, usize>,
    conflicts: Vec<Conflict>,
    stats: AggregateStats,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MessageDescriptor> {
        self.index.get(id).map(|&i| &self.messages[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Survivors in the order their identifiers were first seen.
    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<MessageDescriptor> {
        self.messages
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Fold one descriptor into the aggregate.
    pub fn fold(mut self, mut incoming: MessageDescriptor) -> (Self, FoldOutcome) {
        let slot = self.index.get(&incoming.id).copied();
        let outcome = resolve(slot.map(|i| &self.messages[i]), &incoming);
        self.stats.record(outcome);

        debug!(
            id = %incoming.id,
            file = %incoming.source_file,
            ?outcome,
            "fold"
        );

        match (slot, outcome) {
            (None, _) | (_, FoldOutcome::Inserted) => {
                self.index
                    .insert(incoming.id.clone(), self.messages.len());
                self.messages.push(incoming);
            }
            (Some(i), FoldOutcome::Merged { demoted_feature }) => {
                incoming.is_duplicate = true;
                let survivor = &mut self.messages[i];
                merge_into(survivor, incoming);
                if demoted_feature {
                    survivor.feature_scope = None;
                }
            }
            (Some(i), FoldOutcome::Discarded { demoted }) => {
                let survivor = &mut self.messages[i];
                survivor.is_duplicate = true;
                self.conflicts.push(Conflict {
                    id: incoming.id,
                    scope: demoted,
                    kept_file: survivor.source_file.clone(),
                    discarded_file: incoming.source_file,
                });
            }
        }

        (self, outcome)
    }

    /// Fold a whole file.
    ///
    /// Repeated ids inside the file are collapsed first: the last descriptor
    /// wins outright, at the position where the id first appeared.
    pub fn fold_batch(mut self, batch: FileBatch) -> Self {
        let mut order: Vec<MessageDescriptor> = Vec::with_capacity(batch.messages.len());
        let mut seen: HashMap<String, usize> = HashMap::new();

        for message in batch.messages {
            match seen.get(&message.id) {
                Some(&i) => {
                    self.stats.overwritten_in_file += 1;
                    order[i] = message;
                }
                None => {
                    seen.insert(message.id.clone(), order.len());
                    order.push(message);
                }
            }
        }

        for message in order {
            self = self.fold(message).0;
        }
        self
    }
}

/// Fold every batch, in order, starting from an empty aggregate.
pub fn aggregate(batches: impl IntoIterator<Item = FileBatch>) -> Aggregate {
    batches
        .into_iter()
        .fold(Aggregate::new(), Aggregate::fold_batch)
}
