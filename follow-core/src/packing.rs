//! Ring builder: splits the follower sequence into concentric rings.
//!
//! The scan is greedy. Followers are appended to the current ring in
//! order until the next one no longer fits in the ring's angular budget;
//! that follower then opens the next ring. The ring radius depends on
//! the biggest follower admitted so far, so whenever a bigger follower
//! arrives every gap angle of the ring is recomputed for the new radius.
//!
//! Angles between neighbours come from the chord that keeps them apart:
//! `size_a + spacing + size_b`. Arc rings additionally spend the edge
//! angle of their first and last follower so both stay inside the sector.
//! Orbit rings instead spend the closing gap between the last and the
//! first follower.

use crate::config::{Distribution, Layout, PackingMode, PackingParameters};
use crate::geometry::{NO_FIT, advance_on_circle, edge_angle};
use crate::ring::Ring;
use std::f32::consts::TAU;

/// Packs `sizes` into rings around a leader of radius `leader_size`.
///
/// Every follower lands on exactly one ring and rings hold contiguous runs
/// of the sequence, so reading the rings in order gives back the input
/// order. No followers means no rings.
pub fn pack(sizes: &[f32], leader_size: f32, params: &PackingParameters) -> Vec<Ring> {
    let params = params.normalized();
    if sizes.is_empty() {
        return Vec::new();
    }

    let builder = RingBuilder::new(sizes, &params);
    let mut rings = Vec::with_capacity(4);
    let mut inner = (params.ring_gap + leader_size).max(1.0);
    let mut start = 0;
    let mut squeezed = 0;

    while start < sizes.len() {
        let ring = builder.build_ring(start, inner);
        if ring.len() == 1 && builder.lone_overflows(&ring) {
            squeezed += 1;
        }
        inner = ring.outer_edge() + params.ring_gap;
        start = ring.members().end;
        rings.push(ring);
    }

    if squeezed > 0 {
        tracing::warn!(
            followers = squeezed,
            max_angle = params.max_angle,
            "followers wider than the arc sector were placed anyway"
        );
    }
    rings
}

/// Per-pack scratch state: sizes, chords and the normalized parameters.
struct RingBuilder<'a> {
    sizes: &'a [f32],
    /// `chords[i]` separates follower `i` from follower `i + 1`.
    chords: Vec<f32>,
    params: &'a PackingParameters,
    budget: f32,
}

impl<'a> RingBuilder<'a> {
    fn new(sizes: &'a [f32], params: &'a PackingParameters) -> Self {
        let chords = sizes
            .windows(2)
            .map(|w| w[0] + params.follower_spacing + w[1])
            .collect();
        Self {
            sizes,
            chords,
            params,
            budget: params.budget(),
        }
    }

    fn gap_angle(&self, radius: f32, chord: f32) -> f32 {
        match self.params.packing {
            PackingMode::Exact => advance_on_circle(radius, chord, NO_FIT),
            PackingMode::Approximate => chord / radius,
        }
    }

    fn edge(&self, radius: f32, size: f32) -> f32 {
        match self.params.packing {
            PackingMode::Exact => edge_angle(radius, size, 0.0),
            PackingMode::Approximate => size / radius,
        }
    }

    /// Chord closing an orbit ring, from follower `last` back to `first`.
    fn closing_chord(&self, first: usize, last: usize) -> f32 {
        self.sizes[last] + self.params.follower_spacing + self.sizes[first]
    }

    /// Sum of the gap angles between followers `start..=end` at `radius`.
    ///
    /// `chord_sum` must be the sum of `chords[start..end]`; the linear
    /// estimate only needs that, the exact mode walks the chords backwards.
    fn span(&self, start: usize, end: usize, chord_sum: f32, radius: f32) -> f32 {
        match self.params.packing {
            PackingMode::Exact => (start..end)
                .rev()
                .map(|i| self.gap_angle(radius, self.chords[i]))
                .sum(),
            PackingMode::Approximate => chord_sum / radius,
        }
    }

    /// Whether followers `start..=last` overflow the budget, given the gap
    /// angles between them sum to `consumed`.
    fn overflows(&self, start: usize, last: usize, radius: f32, consumed: f32) -> bool {
        let used = match self.params.layout {
            Layout::Arc => {
                self.edge(radius, self.sizes[start])
                    + consumed
                    + self.edge(radius, self.sizes[last])
            }
            Layout::Orbit => {
                consumed + self.gap_angle(radius, self.closing_chord(start, last))
            }
        };
        used > self.budget
    }

    /// Builds the ring whose first follower is `start` and whose inner
    /// boundary is `inner`.
    fn build_ring(&self, start: usize, inner: f32) -> Ring {
        let mut biggest = self.sizes[start];
        // Value of `biggest` before the last follower that raised it.
        let mut last_biggest = 0.0;
        let mut consumed = 0.0;
        let mut chord_sum = 0.0;
        let mut end = start;

        while end + 1 < self.sizes.len() {
            let next = end + 1;
            let size = self.sizes[next];
            let grew = size > biggest;

            if grew {
                last_biggest = biggest;
                biggest = size;
                // Earlier gaps were measured on a smaller circle.
                consumed = self.span(start, end, chord_sum, inner + biggest);
            }

            let radius = inner + biggest;
            let chord = self.chords[end];
            let step = self.gap_angle(radius, chord);
            consumed += step;

            if self.overflows(start, next, radius, consumed) {
                if grew {
                    // The overflowing follower raised the radius: go back to
                    // the largest size seen before it, not to a minimum.
                    biggest = last_biggest;
                    consumed = self.span(start, end, chord_sum, inner + biggest);
                } else {
                    consumed -= step;
                }
                break;
            }

            chord_sum += chord;
            end = next;
        }

        self.finish_ring(start, end, biggest, inner, consumed)
    }

    /// Chooses the radius and angular offsets of the ring `start..=end`,
    /// whose gap angles sum to `spent`.
    fn finish_ring(
        &self,
        start: usize,
        end: usize,
        biggest: f32,
        inner: f32,
        spent: f32,
    ) -> Ring {
        let count = end - start + 1;
        let mut radius = inner + biggest;

        if count == 1 {
            if self.params.strong
                && self.params.layout == Layout::Arc
                && 2.0 * self.edge(radius, biggest) > self.budget
            {
                // budget < π here, so the sine is positive.
                radius = biggest / (self.budget / 2.0).sin();
            }
            let offset = match self.params.layout {
                Layout::Orbit => 0.0,
                Layout::Arc => self.budget / 2.0,
            };
            return Ring::new(radius, biggest, start, vec![offset]);
        }

        let gaps = (start..end).map(|i| self.gap_angle(radius, self.chords[i]));

        let (first, slack, slots) = match self.params.layout {
            Layout::Arc => {
                let head = self.edge(radius, self.sizes[start]);
                let tail = self.edge(radius, self.sizes[end]);
                (head, self.budget - (head + spent + tail), count - 1)
            }
            Layout::Orbit => {
                let closing = self.gap_angle(radius, self.closing_chord(start, end));
                (0.0, TAU - (spent + closing), count)
            }
        };
        let slack = slack.max(0.0);

        let (first, extra) = match (self.params.distribution, self.params.layout) {
            (Distribution::Uniform, _) => (first, slack / slots as f32),
            (Distribution::Proportional, Layout::Arc) => (first + slack / 2.0, 0.0),
            // The remainder ends up in the wrap-around gap.
            (Distribution::Proportional, Layout::Orbit) => (first, 0.0),
        };

        let mut offsets = Vec::with_capacity(count);
        let mut angle = first;
        offsets.push(angle);
        for gap in gaps {
            angle += gap + extra;
            offsets.push(angle);
        }

        Ring::new(radius, biggest, start, offsets)
    }

    /// A lone arc follower wider than the sector, left unpushed.
    fn lone_overflows(&self, ring: &Ring) -> bool {
        self.params.layout == Layout::Arc
            && 2.0 * self.edge(ring.radius, ring.biggest) > self.budget + 1e-6
    }
}
