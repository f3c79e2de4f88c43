//! Median-split balancing of the command storage.
//!
//! Ranked records are moved, by swapping, so that position `i` holds the
//! `i`-th node of a pre-order walk over the balanced tree. Re-inserting the
//! records in that storage order then produces the balanced links.
//!
//! ```text
//! ranks 0..=6          storage after balancing
//!
//!        3             [3, 1, 0, 2, 5, 4, 6]
//!      /   \
//!     1     5
//!    / \   / \
//!   0   2 4   6
//! ```
//!
//! With an even number of ranks in a range the lower median is picked, so the
//! left subtree gets the extra node.

use heapless::Vec;
use log::debug;

use super::{Command, Error, link};

const UNPLACED: u16 = u16::MAX;

/// Reorder ranked records into balanced pre-order and relink the tree.
pub(crate) fn balance<const N: usize>(records: &mut Vec<Command, N>) -> Result<(), Error> {
    let len = records.len();
    if len == 0 {
        return Ok(());
    }

    let mut position = [UNPLACED; N];
    for (index, record) in records.iter().enumerate() {
        let rank = usize::from(record.rank);
        if rank >= len || position[rank] != UNPLACED {
            return Err(Error::Corrupted);
        }
        // index < N <= u16::MAX
        position[rank] = index as u16;
    }

    let mut placer = Placer {
        records: records.as_mut_slice(),
        position: &mut position[..len],
        next: 0,
    };
    placer.place(0, len);

    relink(records)?;

    debug!("balancer finished, root is '{}'", records[0].name);
    Ok(())
}

struct Placer<'a> {
    records: &'a mut [Command],
    /// Current storage index of every rank.
    position: &'a mut [u16],
    next: usize,
}

impl Placer<'_> {
    /// Place the ranks `lo..hi` starting at storage index `self.next`.
    fn place(&mut self, lo: usize, hi: usize) {
        if lo >= hi {
            return;
        }

        let mid = (lo + hi - 1) / 2;
        self.move_rank(mid);

        self.place(lo, mid);
        self.place(mid + 1, hi);
    }

    fn move_rank(&mut self, rank: usize) {
        let target = self.next;
        let current = usize::from(self.position[rank]);

        self.records.swap(target, current);

        let displaced = usize::from(self.records[current].rank);
        self.position[displaced] = current as u16;
        self.position[rank] = target as u16;

        self.next += 1;
    }
}

/// Drop all links and insert the records again in storage order.
fn relink(records: &mut [Command]) -> Result<(), Error> {
    for record in records.iter_mut() {
        record.left = None;
        record.right = None;
    }

    for index in 1..records.len() {
        link(records, index)?;
    }

    Ok(())
}
