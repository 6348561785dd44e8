use std::collections::HashMap;

use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};

use crate::{
    error::GenerationError,
    generators::Algorithm,
    maze::{Direction, Grid, TraversalState},
    partition::{ClassId, Partition},
};

/// Eller's algorithm run on concentric rings instead of rows, from the center outward.
///
/// The grid is centered in a virtual square of side `max(width, height)` whose rings play
/// the role of Eller's rows. On a rectangle the outer rings lose their short sides, so a
/// ring is processed as one or more segments: runs of ring-consecutive real cells.
///
/// For every ring except the last:
/// 1. consecutive cells of different classes are joined at random;
/// 2. a class whose members in a segment cannot reach the next ring is joined with a
///    segment neighbor until it can;
/// 3. if the next ring has more segments than this one, each segment is joined completely
///    and linked once into every next segment it borders;
/// 4. otherwise cells link outward at random, and every class gets at least one outward
///    link per segment.
///
/// The last ring joins every consecutive pair of different classes.
pub fn eller_inside_out<G, R>(grid: &mut G, rng: &mut R) -> Result<(), GenerationError>
where
    G: Grid,
    R: Rng + ?Sized,
{
    let cells = grid.cell_count();
    if cells == 0 {
        return Ok(());
    }

    let (width, height) = grid.dimensions();
    let rings = Rings::new(width, height);
    let mut partition = Partition::with_capacity(cells);

    let mut layer = rings.segments(&*grid, 0);
    for k in 0..rings.layer_count() {
        let next = if k + 1 < rings.layer_count() {
            rings.segments(&*grid, k + 1)
        } else {
            Vec::new()
        };

        if next.is_empty() {
            for segment in &layer {
                for (a, b) in segment.pairs() {
                    join(grid, &mut partition, a, b);
                }
            }
        } else {
            join_randomly(grid, &layer, &mut partition, rng);
            repair_stranded(grid, &layer, &mut partition, rng);
            if next.len() > layer.len() {
                split_into(grid, &layer, &next, &mut partition, rng);
            } else {
                link_outward(grid, &layer, &mut partition, rng);
            }
        }

        for slot in layer.iter().flat_map(|segment| &segment.slots) {
            grid.set_tag(slot.cell, TraversalState::Completed);
        }
        tracing::trace!(
            "[eller-inside-out] layer {} done ({} segments)",
            k,
            layer.len()
        );
        layer = next;
    }

    if cfg!(debug_assertions) {
        for cell in grid.cells() {
            partition.find(cell);
        }
        debug_assert_eq!(partition.class_count(), 1, "every cell must end in one class");
    }

    let expected = cells - 1;
    if grid.edge_count() != expected {
        tracing::error!(
            "[eller-inside-out] {} passages on {} cells",
            grid.edge_count(),
            cells
        );
        return Err(GenerationError::EdgeCountMismatch {
            algorithm: Algorithm::EllerInsideOut,
            expected,
            actual: grid.edge_count(),
        });
    }
    Ok(())
}

/// Joins `a` and `b` if they are in different classes.
fn join<G: Grid>(
    grid: &mut G,
    partition: &mut Partition<G::Cell>,
    a: G::Cell,
    b: G::Cell,
) -> bool {
    let (class_a, class_b) = (partition.find(a), partition.find(b));
    if class_a == class_b {
        return false;
    }
    partition.union(class_a, class_b);
    grid.add_edge(a, b);
    true
}

fn join_randomly<G, R>(
    grid: &mut G,
    layer: &[Segment<G::Cell>],
    partition: &mut Partition<G::Cell>,
    rng: &mut R,
) where
    G: Grid,
    R: Rng + ?Sized,
{
    for segment in layer {
        for (a, b) in segment.pairs() {
            if partition.find(a) != partition.find(b) && rng.random_bool(0.5) {
                join(grid, partition, a, b);
            }
        }
    }
}

/// Merges classes that have no way out of their segment into a neighboring class.
///
/// One pass over the segment's pairs in random order is enough: a class never becomes
/// stranded again once it can leave, and two classes never split.
fn repair_stranded<G, R>(
    grid: &mut G,
    layer: &[Segment<G::Cell>],
    partition: &mut Partition<G::Cell>,
    rng: &mut R,
) where
    G: Grid,
    R: Rng + ?Sized,
{
    for segment in layer {
        let mut can_leave: HashMap<ClassId, bool> = HashMap::new();
        for slot in &segment.slots {
            let class = partition.find(slot.cell);
            *can_leave.entry(class).or_default() |= !slot.outward.is_empty();
        }

        let mut pairs = segment.pairs().collect::<Vec<_>>();
        pairs.shuffle(rng);
        for (a, b) in pairs {
            let (class_a, class_b) = (partition.find(a), partition.find(b));
            if class_a == class_b {
                continue;
            }
            let leave_a = can_leave.remove(&class_a).unwrap_or(false);
            let leave_b = can_leave.remove(&class_b).unwrap_or(false);
            if leave_a && leave_b {
                can_leave.insert(class_a, true);
                can_leave.insert(class_b, true);
                continue;
            }
            join(grid, partition, a, b);
            can_leave.insert(partition.find(a), leave_a || leave_b);
        }
    }
}

/// Used when the next ring breaks into more segments than this one has: every segment
/// becomes a single class that reaches into each next segment it borders.
fn split_into<G, R>(
    grid: &mut G,
    layer: &[Segment<G::Cell>],
    next: &[Segment<G::Cell>],
    partition: &mut Partition<G::Cell>,
    rng: &mut R,
) where
    G: Grid,
    R: Rng + ?Sized,
{
    let owner = next
        .iter()
        .enumerate()
        .flat_map(|(i, segment)| segment.slots.iter().map(move |slot| (slot.cell, i)))
        .collect::<HashMap<_, _>>();

    for segment in layer {
        for (a, b) in segment.pairs() {
            join(grid, partition, a, b);
        }
        for target in 0..next.len() {
            let links = segment
                .links()
                .filter(|(_, outer)| owner.get(outer) == Some(&target))
                .collect::<Vec<_>>();
            if let Some(&(a, b)) = links.choose(rng) {
                join(grid, partition, a, b);
            }
        }
    }
}

/// Random outward links, then one forced link for every class of a segment that got none.
fn link_outward<G, R>(
    grid: &mut G,
    layer: &[Segment<G::Cell>],
    partition: &mut Partition<G::Cell>,
    rng: &mut R,
) where
    G: Grid,
    R: Rng + ?Sized,
{
    for segment in layer {
        let mut linked = vec![false; segment.slots.len()];
        for (i, slot) in segment.slots.iter().enumerate() {
            for &outer in &slot.outward {
                if rng.random_bool(0.5) && join(grid, partition, slot.cell, outer) {
                    linked[i] = true;
                }
            }
        }

        // Groups in order of first appearance along the segment
        let mut groups: Vec<(bool, Vec<usize>)> = Vec::new();
        let mut group_of: HashMap<ClassId, usize> = HashMap::new();
        for (i, slot) in segment.slots.iter().enumerate() {
            let class = partition.find(slot.cell);
            let group = *group_of.entry(class).or_insert_with(|| {
                groups.push((false, Vec::new()));
                groups.len() - 1
            });
            groups[group].0 |= linked[i];
            groups[group].1.push(i);
        }

        for (has_link, members) in groups {
            if has_link {
                continue;
            }
            let links = members
                .iter()
                .flat_map(|&i| {
                    let slot = &segment.slots[i];
                    slot.outward.iter().map(move |&outer| (slot.cell, outer))
                })
                .collect::<Vec<_>>();
            if let Some(&(a, b)) = links.choose(rng) {
                join(grid, partition, a, b);
            }
        }
    }
}

/// A ring cell and its neighbors in the next ring.
#[derive(Debug, Clone)]
struct Slot<C> {
    cell: C,
    outward: Vec<C>,
}

/// A run of ring-consecutive cells. A cyclic segment is a whole ring, closed by the pair
/// (last, first).
#[derive(Debug, Clone)]
struct Segment<C> {
    slots: Vec<Slot<C>>,
    cyclic: bool,
}

impl<C: Copy> Segment<C> {
    fn pairs(&self) -> impl Iterator<Item = (C, C)> + '_ {
        let wrap = match self.slots.as_slice() {
            [first, .., last] if self.cyclic && self.slots.len() > 2 => {
                Some((last.cell, first.cell))
            }
            _ => None,
        };
        self.slots
            .windows(2)
            .map(|pair| (pair[0].cell, pair[1].cell))
            .chain(wrap)
    }

    fn links(&self) -> impl Iterator<Item = (C, C)> + '_ {
        self.slots
            .iter()
            .flat_map(|slot| slot.outward.iter().map(move |&outer| (slot.cell, outer)))
    }
}

/// Ring geometry of a `width` x `height` grid centered in a square of side
/// `max(width, height)`.
#[derive(Debug, Clone, Copy)]
struct Rings {
    side: usize,
    offset: (usize, usize),
    width: usize,
    height: usize,
}

impl Rings {
    fn new(width: usize, height: usize) -> Self {
        let side = width.max(height);
        Rings {
            side,
            offset: ((side - width) / 2, (side - height) / 2),
            width,
            height,
        }
    }

    fn layer_count(&self) -> usize {
        self.side.div_ceil(2)
    }

    /// First and last square coordinate covered by ring `k`, on both axes.
    fn bounds(&self, k: usize) -> (usize, usize) {
        ((self.side - 1) / 2 - k, self.side / 2 + k)
    }

    /// Square positions of ring `k`, clockwise from its top-left corner.
    fn positions(&self, k: usize) -> Vec<(usize, usize)> {
        let (lo, hi) = self.bounds(k);
        if lo == hi {
            return vec![(lo, lo)];
        }
        let mut ring = Vec::with_capacity(4 * (hi - lo));
        ring.extend((lo..hi).map(|x| (x, lo)));
        ring.extend((lo..hi).map(|y| (hi, y)));
        ring.extend((lo + 1..=hi).rev().map(|x| (x, hi)));
        ring.extend((lo + 1..=hi).rev().map(|y| (lo, y)));
        ring
    }

    /// Grid column and row of a square position, if it lies on the grid.
    fn to_grid(&self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        let col = x.checked_sub(self.offset.0).filter(|&col| col < self.width)?;
        let row = y.checked_sub(self.offset.1).filter(|&row| row < self.height)?;
        Some((col, row))
    }

    fn segments<G: Grid>(&self, grid: &G, k: usize) -> Vec<Segment<G::Cell>> {
        let (lo, hi) = self.bounds(k);
        let slots = self
            .positions(k)
            .into_iter()
            .map(|(x, y)| {
                let (col, row) = self.to_grid((x, y))?;
                let cell = grid.cell_at(col, row)?;
                let outward = Direction::ALL
                    .into_iter()
                    .filter(|dir| match dir {
                        Direction::North => y == lo,
                        Direction::East => x == hi,
                        Direction::South => y == hi,
                        Direction::West => x == lo,
                    })
                    .filter_map(|dir| grid.neighbor(cell, dir))
                    .collect();
                Some(Slot { cell, outward })
            })
            .collect::<Vec<_>>();

        let Some(gap) = slots.iter().position(Option::is_none) else {
            return vec![Segment {
                slots: slots.into_iter().flatten().collect(),
                cyclic: true,
            }];
        };

        // Walk once around the ring starting right after a gap, so no run wraps
        let mut segments = Vec::new();
        let mut run = Vec::new();
        for i in 1..=slots.len() {
            match &slots[(gap + i) % slots.len()] {
                Some(slot) => run.push(slot.clone()),
                None if !run.is_empty() => segments.push(Segment {
                    slots: std::mem::take(&mut run),
                    cyclic: false,
                }),
                None => {}
            }
        }
        segments
    }
}
