//! Ray propagation: tracing lazors and their branches over one fixed placement.

use std::collections::HashSet;

use log::trace;
use strum::VariantArray;

use crate::location::LatticePoint;
use crate::placement::Placement;
use crate::ray::{Contact, Heading, Lazor, Ray};

/// Walks every branch of one lazor over a fixed [`Placement`], yielding each distinct ray state once.
///
/// Branches are kept on an explicit stack rather than the call stack. A state already seen is never expanded again:
/// everything reachable from it has been or will be yielded anyway, so loops between reflectors end after one lap.
///
/// Each item pairs a state with what happens at the cell it faces.
/// [`Contact::Absorb`] also stands for a ray leaving the board.
pub struct Tracer<'a> {
    placement: &'a Placement,
    extent: (i32, i32),
    seen: HashSet<Ray>,
    pending: Vec<Ray>,
}

impl<'a> Tracer<'a> {
    /// Start tracing `lazor` over `placement`.
    pub fn new(placement: &'a Placement, lazor: &Lazor) -> Self {
        let (w, h) = placement.dims();
        Self {
            placement,
            extent: (2 * w as i32, 2 * h as i32),
            seen: HashSet::new(),
            pending: vec![lazor.ray()],
        }
    }

    /// How many distinct states have been yielded so far.
    pub fn states(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    fn on_board(&self, ray: &Ray) -> bool {
        (0..=self.extent.0).contains(&ray.at.0) && (0..=self.extent.1).contains(&ray.at.1)
    }

    fn contact(&self, ray: Ray) -> Contact {
        let contact = match self.placement.probe(ray.facing()) {
            // facing off the board
            None => return Contact::Absorb,
            Some(None) => Contact::Continue(ray.advance()),
            Some(Some(block)) => block.on_contact(ray),
        };

        // a reflection off the outer face of a border cell points straight off the board
        match contact {
            Contact::Continue(next) if !self.on_board(&next) => Contact::Absorb,
            Contact::Split(through, reflected) => match (self.on_board(&through), self.on_board(&reflected)) {
                (true, true) => contact,
                (true, false) => Contact::Continue(through),
                (false, true) => Contact::Continue(reflected),
                (false, false) => Contact::Absorb,
            },
            other => other,
        }
    }
}

impl Iterator for Tracer<'_> {
    type Item = (Ray, Contact);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ray) = self.pending.pop() {
            if !self.seen.insert(ray) {
                continue;
            }

            let contact = self.contact(ray);
            match contact {
                Contact::Continue(next) => self.pending.push(next),
                Contact::Split(through, reflected) => {
                    // follow the transmitted branch first
                    self.pending.push(reflected);
                    self.pending.push(through);
                }
                Contact::Absorb => {}
            }

            return Some((ray, contact));
        }

        None
    }
}

/// The most ray states a single lazor can ever pass through on a `width` by `height` board:
/// every edge midpoint paired with every heading.
pub fn max_states(width: usize, height: usize) -> usize {
    let midpoints = (width + 1) * height + width * (height + 1);
    midpoints * Heading::VARIANTS.len()
}

/// Trace every lazor over `placement`, striking points off `points` as rays touch them.
///
/// Returns `true` if and only if nothing is left in `points` afterwards. Tracing stops as soon as `points` runs out.
pub fn evaluate(placement: &Placement, lazors: &[Lazor], points: &mut HashSet<LatticePoint>) -> bool {
    for lazor in lazors {
        if points.is_empty() {
            break;
        }

        let mut tracer = Tracer::new(placement, lazor);
        for (ray, _) in tracer.by_ref() {
            points.remove(&ray.at);
            if points.is_empty() {
                break;
            }
        }
        trace!("lazor from {} covered {} states, {} points remain", lazor.origin, tracer.states(), points.len());
    }

    points.is_empty()
}

/// Everything one lazor does over a placement.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trace {
    /// Distinct points touched, in the order first reached.
    pub visited: Vec<LatticePoint>,
    /// Straight pieces of the path, each one lattice step long.
    pub segments: Vec<(LatticePoint, LatticePoint)>,
    /// Distinct ray states passed through.
    pub states: usize,
}

/// Follow `lazor` and all of its branches to the end, without stopping early.
pub fn trace(placement: &Placement, lazor: &Lazor) -> Trace {
    let mut tracer = Tracer::new(placement, lazor);
    let mut seen_points = HashSet::new();
    let mut out = Trace::default();

    for (ray, contact) in tracer.by_ref() {
        if seen_points.insert(ray.at) {
            out.visited.push(ray.at);
        }
        match contact {
            Contact::Continue(next) => out.segments.push((ray.at, next.at)),
            Contact::Split(through, reflected) => {
                out.segments.push((ray.at, through.at));
                out.segments.push((ray.at, reflected.at));
            }
            Contact::Absorb => {}
        }
    }

    out.states = tracer.states();
    out
}
