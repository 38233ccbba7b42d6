//! Message-passing layer: rank groups over a channel mesh.
//!
//! This module defines:
//! - [`Group`]: the communicator handle a rank holds: point-to-point
//!   messaging plus the collectives the sort needs (broadcast, gather,
//!   variable-length gather, sum reduction, barrier) and the color split
//!   that drives the recursion.
//! - [`Partition`]: a counts-and-displacements layout for reassembling
//!   per-rank segments of differing sizes on the root.
//! - [`launch`]: the thread-per-rank harness that builds the channel mesh,
//!   runs one job closure per rank, and joins the cohort.
//!
//! Ranks share no mutable state. Every payload moves by value through an
//! unbounded channel, one channel per ordered rank pair, so messages between
//! a pair arrive in send order and a combined send-and-receive can post its
//! outgoing half without blocking. A rank that returns early drops its
//! endpoints; peers observe the disconnection as an error at their next
//! suspension point and unwind in turn.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::thread;

use crate::error::{Error, Result};

/// Group rank of the designated root/leader.
pub const ROOT: usize = 0;

/// Protocol tags. The numeric values are part of the wire protocol: the
/// length phase of a pair exchange travels under tag 0 and the payload
/// phase under tag 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Outgoing element count of a pair exchange.
    Len = 0,
    /// Payload of a pair exchange.
    Data = 1,
    /// Root-to-rank block distribution.
    Scatter = 2,
    /// One-to-all value distribution.
    Bcast = 3,
    /// All-to-root collection (fixed or varied size).
    Gather = 4,
    /// All-to-root sum contribution.
    Reduce = 5,
    /// Barrier token.
    Barrier = 6,
}

/// Which half of a group a rank lands in when the group splits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Ranks below the midpoint; keep elements ≤ pivot.
    Low = 0,
    /// Ranks at or above the midpoint; keep elements > pivot.
    High = 1,
}

impl Color {
    /// The color of `rank` in a group of `size` members.
    pub fn of(rank: usize, size: usize) -> Color {
        if rank < size / 2 { Color::Low } else { Color::High }
    }
}

struct Packet {
    tag: Tag,
    data: Vec<i32>,
}

/// One rank's endpoints for a single peer: a sender toward the peer and a
/// receiver for traffic coming back from it.
#[derive(Clone)]
struct Link {
    tx: Sender<Packet>,
    rx: Receiver<Packet>,
}

/// Communicator handle for one rank within an ordered group.
///
/// A `Group` is held and used by exactly one rank; the collectives are
/// cooperative, so every member of the group must make the matching call
/// before any member returns from it. Splitting produces a handle for the
/// sub-group that shares the caller's color, re-indexed from 0, and needs
/// no communication.
pub struct Group {
    rank: usize,
    links: Vec<Link>,
}

impl Group {
    /// This rank's index within the group.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of ranks in the group.
    pub fn size(&self) -> usize {
        self.links.len()
    }

    /// Whether this rank is the group root.
    pub fn is_root(&self) -> bool {
        self.rank == ROOT
    }

    fn send(&self, to: usize, tag: Tag, data: Vec<i32>) -> Result<()> {
        self.links[to]
            .tx
            .send(Packet { tag, data })
            .map_err(|_| Error::Disconnected { peer: to })
    }

    fn recv(&self, from: usize, tag: Tag) -> Result<Vec<i32>> {
        let packet = self.links[from]
            .rx
            .recv()
            .map_err(|_| Error::Disconnected { peer: from })?;
        if packet.tag != tag {
            return Err(Error::TagMismatch {
                peer: from,
                expected: tag,
                got: packet.tag,
            });
        }
        Ok(packet.data)
    }

    fn recv_scalar(&self, from: usize, tag: Tag) -> Result<i32> {
        let data = self.recv(from, tag)?;
        match data.as_slice() {
            [value] => Ok(*value),
            _ => Err(Error::LengthMismatch {
                peer: from,
                announced: 1,
                got: data.len(),
            }),
        }
    }

    /// Combined send-and-receive with a partner rank.
    ///
    /// Posts the outgoing payload before blocking on the incoming one, so
    /// two partners calling this against each other always make progress,
    /// whatever the payload sizes. Both sides must use the same `tag`.
    pub fn send_receive(&self, partner: usize, tag: Tag, outgoing: &[i32]) -> Result<Vec<i32>> {
        self.send(partner, tag, outgoing.to_vec())?;
        self.recv(partner, tag)
    }

    /// Distributes `value` from `root` to every rank of the group.
    ///
    /// The argument is significant only on the root; every rank returns the
    /// root's value.
    pub fn broadcast(&self, root: usize, value: i32) -> Result<i32> {
        if self.rank == root {
            for peer in 0..self.size() {
                if peer != root {
                    self.send(peer, Tag::Bcast, vec![value])?;
                }
            }
            Ok(value)
        } else {
            self.recv_scalar(root, Tag::Bcast)
        }
    }

    /// Collects one value per rank on `root`, in rank order.
    ///
    /// Returns `Some` on the root and `None` everywhere else.
    pub fn gather(&self, root: usize, value: i32) -> Result<Option<Vec<i32>>> {
        if self.rank == root {
            let mut gathered = vec![0; self.size()];
            gathered[root] = value;
            for peer in 0..self.size() {
                if peer != root {
                    gathered[peer] = self.recv_scalar(peer, Tag::Gather)?;
                }
            }
            Ok(Some(gathered))
        } else {
            self.send(root, Tag::Gather, vec![value])?;
            Ok(None)
        }
    }

    /// Reassembles per-rank segments of differing sizes on `root`.
    ///
    /// Each rank contributes its whole `segment`; the root places rank i's
    /// payload at `layout` displacement i and checks it against the count
    /// announced there. `layout` is significant (and required) only on the
    /// root; non-root callers pass `None`.
    ///
    /// # Panics
    ///
    /// Panics if the root calls without a layout.
    pub fn gather_varied(
        &self,
        root: usize,
        segment: &[i32],
        layout: Option<&Partition>,
    ) -> Result<Option<Vec<i32>>> {
        if self.rank != root {
            self.send(root, Tag::Gather, segment.to_vec())?;
            return Ok(None);
        }
        let layout = layout.expect("gather_varied: root must supply a partition layout");
        let mut assembled = vec![0; layout.total()];
        let at = layout.displ(root);
        assembled[at..at + segment.len()].copy_from_slice(segment);
        for peer in 0..self.size() {
            if peer != root {
                let incoming = self.recv(peer, Tag::Gather)?;
                if incoming.len() != layout.count(peer) {
                    return Err(Error::LengthMismatch {
                        peer,
                        announced: layout.count(peer),
                        got: incoming.len(),
                    });
                }
                let at = layout.displ(peer);
                assembled[at..at + incoming.len()].copy_from_slice(&incoming);
            }
        }
        Ok(Some(assembled))
    }

    /// Sums one contribution per rank, delivering the total to `root`.
    ///
    /// Returns `Some` on the root and `None` everywhere else. The
    /// accumulator is widened so large groups cannot overflow it.
    pub fn reduce_sum(&self, root: usize, value: i32) -> Result<Option<i64>> {
        if self.rank == root {
            let mut total = i64::from(value);
            for peer in 0..self.size() {
                if peer != root {
                    total += i64::from(self.recv_scalar(peer, Tag::Reduce)?);
                }
            }
            Ok(Some(total))
        } else {
            self.send(root, Tag::Reduce, vec![value])?;
            Ok(None)
        }
    }

    /// Splits `source` on the root into equal blocks of `chunk` elements,
    /// delivering block i to rank i. `source` is significant only on the
    /// root and must hold exactly `chunk * size` elements there.
    ///
    /// # Panics
    ///
    /// Panics if the root calls without a source buffer.
    pub fn scatter(&self, root: usize, source: Option<&[i32]>, chunk: usize) -> Result<Vec<i32>> {
        if self.rank == root {
            let source = source.expect("scatter: root must supply the source buffer");
            for peer in 0..self.size() {
                if peer != root {
                    self.send(peer, Tag::Scatter, source[peer * chunk..(peer + 1) * chunk].to_vec())?;
                }
            }
            Ok(source[root * chunk..(root + 1) * chunk].to_vec())
        } else {
            let block = self.recv(root, Tag::Scatter)?;
            if block.len() != chunk {
                return Err(Error::LengthMismatch {
                    peer: root,
                    announced: chunk,
                    got: block.len(),
                });
            }
            Ok(block)
        }
    }

    /// Holds every rank of the group until all of them have arrived.
    pub fn barrier(&self) -> Result<()> {
        if self.rank == ROOT {
            for peer in 1..self.size() {
                self.recv(peer, Tag::Barrier)?;
            }
            for peer in 1..self.size() {
                self.send(peer, Tag::Barrier, Vec::new())?;
            }
        } else {
            self.send(ROOT, Tag::Barrier, Vec::new())?;
            self.recv(ROOT, Tag::Barrier)?;
        }
        Ok(())
    }

    /// Handle for the half-group matching `color`, re-indexed from 0.
    ///
    /// The caller must belong to the chosen half; the parent handle stays
    /// usable until dropped, though the sort never touches it again after
    /// splitting.
    pub fn split(&self, color: Color) -> Group {
        let half = self.size() / 2;
        let members = match color {
            Color::Low => 0..half,
            Color::High => half..self.size(),
        };
        debug_assert!(members.contains(&self.rank));
        Group {
            rank: self.rank - members.start,
            links: self.links[members].to_vec(),
        }
    }
}

/// Counts-and-displacements layout for a variable-length gather.
///
/// Displacements are the exclusive prefix sum of the counts, so rank i's
/// segment lands at `displ(i) .. displ(i) + count(i)` of the assembled
/// buffer.
pub struct Partition {
    counts: Vec<usize>,
    displs: Vec<usize>,
}

impl Partition {
    /// Builds the layout from per-rank element counts.
    pub fn from_counts(counts: &[usize]) -> Partition {
        let mut displs = Vec::with_capacity(counts.len());
        let mut sum = 0;
        for &count in counts {
            displs.push(sum);
            sum += count;
        }
        Partition {
            counts: counts.to_vec(),
            displs,
        }
    }

    /// Element count contributed by `rank`.
    pub fn count(&self, rank: usize) -> usize {
        self.counts[rank]
    }

    /// Offset of `rank`'s segment in the assembled buffer.
    pub fn displ(&self, rank: usize) -> usize {
        self.displs[rank]
    }

    /// Total element count across all ranks.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Builds the fully-connected mesh for `size` ranks and hands each rank its
/// `Group`. The rank's link to itself exists for uniform indexing but never
/// carries traffic.
fn mesh(size: usize) -> Vec<Group> {
    let channels: Vec<Vec<(Sender<Packet>, Receiver<Packet>)>> = (0..size)
        .map(|_| (0..size).map(|_| unbounded()).collect())
        .collect();
    (0..size)
        .map(|rank| Group {
            rank,
            links: (0..size)
                .map(|peer| Link {
                    tx: channels[rank][peer].0.clone(),
                    rx: channels[peer][rank].1.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Spawns one thread per rank, runs `job` on each rank's group handle, and
/// returns the per-rank results in rank order.
///
/// The rank count must be a power of two so the group can be halved down to
/// singletons. If any rank fails, the error of the lowest-ranked failing
/// rank is returned; peers of a failed rank unwind with
/// [`Error::Disconnected`].
///
/// # Examples
///
/// ```
/// use hypersort::comm::{self, ROOT};
///
/// let totals = comm::launch(4, |group| {
///     group.reduce_sum(ROOT, group.rank() as i32 + 1)
/// })
/// .unwrap();
///
/// assert_eq!(totals[ROOT], Some(10));
/// ```
pub fn launch<T, F>(ranks: usize, job: F) -> Result<Vec<T>>
where
    F: Fn(Group) -> Result<T> + Sync,
    T: Send,
{
    if !ranks.is_power_of_two() {
        return Err(Error::RanksNotPowerOfTwo(ranks));
    }
    debug!("launching {ranks} ranks");
    let groups = mesh(ranks);
    let job = &job;
    thread::scope(|scope| {
        let handles: Vec<_> = groups
            .into_iter()
            .map(|group| scope.spawn(move || job(group)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("rank thread panicked"))
            .collect()
    })
}
