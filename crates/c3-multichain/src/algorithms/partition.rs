//! # Batch Partitioning
//!
//! Groups a mixed-chain batch by target chain, remembering each item's
//! original position, and writes per-chain results back into place.

use c3_references::ChainId;
use std::collections::BTreeMap;

/// Items routed to one chain, with their positions in the caller's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Target chain
    pub chain: ChainId,
    /// Original index of each item, ascending
    pub indices: Vec<usize>,
    /// Items in original relative order
    pub items: Vec<T>,
}

impl<T> Partition<T> {
    fn new(chain: ChainId) -> Self {
        Self {
            chain,
            indices: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the partition is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split `(chain, item)` pairs into one partition per chain, ordered by
/// chain.
pub fn partition_by_chain<T, I>(items: I) -> Vec<Partition<T>>
where
    I: IntoIterator<Item = (ChainId, T)>,
{
    let mut partitions: BTreeMap<ChainId, Partition<T>> = BTreeMap::new();
    for (index, (chain, item)) in items.into_iter().enumerate() {
        let partition = partitions
            .entry(chain)
            .or_insert_with(|| Partition::new(chain));
        partition.indices.push(index);
        partition.items.push(item);
    }
    partitions.into_values().collect()
}

/// Output buffer indexed by original position.
#[derive(Debug)]
pub struct Reassembly<R> {
    slots: Vec<Option<R>>,
}

impl<R> Reassembly<R> {
    /// Buffer for a batch of `len` items.
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
        }
    }

    /// Place `results[k]` at `indices[k]`.
    pub fn fill<I>(&mut self, indices: &[usize], results: I)
    where
        I: IntoIterator<Item = R>,
    {
        for (&index, result) in indices.iter().zip(results) {
            self.slots[index] = Some(result);
        }
    }

    /// Number of positions filled so far.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Results in original order.
    ///
    /// Positions never filled are skipped, so callers fill every index
    /// first.
    pub fn finish(self) -> Vec<R> {
        debug_assert_eq!(self.filled(), self.slots.len());
        self.slots.into_iter().flatten().collect()
    }
}
