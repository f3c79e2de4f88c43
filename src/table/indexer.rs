//! Alphabetical ranking of the command tree.

use heapless::Vec;
use log::debug;

use super::{Command, Error};

/// Assign every record its 0-based in-order position.
///
/// The tree is walked from position 0 with an explicit stack of at most `N`
/// indices, so a degenerate chain costs no call depth. Every record has to be
/// reached exactly once, otherwise the links are corrupted.
pub(crate) fn index<const N: usize>(records: &mut Vec<Command, N>) -> Result<(), Error> {
    let len = records.len();
    let mut stack: Vec<u16, N> = Vec::new();
    let mut cursor = if len == 0 { None } else { Some(0) };
    let mut counter: u16 = 0;

    loop {
        while let Some(node) = cursor {
            // a left cycle never reaches a leaf
            stack.push(node).map_err(|_| Error::Corrupted)?;
            cursor = records.get(usize::from(node)).ok_or(Error::Corrupted)?.left;
        }

        let Some(node) = stack.pop() else {
            break;
        };
        if usize::from(counter) >= len {
            return Err(Error::Corrupted);
        }

        let record = &mut records[usize::from(node)];
        record.rank = counter;
        counter += 1;
        cursor = record.right;
    }

    if usize::from(counter) != len {
        return Err(Error::Corrupted);
    }

    debug!("indexer finished, {} commands ranked", counter);
    Ok(())
}
