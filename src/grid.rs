//! Cloth topology: a particle grid with structural, shear, and bending springs.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Dimensions of a cloth grid.
///
/// Particle at (row, col) has index `row * cols + col`. Row 0 is the top
/// edge; rows descend along -Y and columns are centered on the X axis, all in
/// the Z = 0 plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLayout<F: Float> {
    pub rows: usize,
    pub cols: usize,
    pub spacing: F,
}

impl<F: Float> GridLayout<F> {
    /// Validate dimensions. Rows and columns must be at least 1, spacing
    /// positive and finite.
    pub fn new(rows: usize, cols: usize, spacing: F) -> Result<Self, ClothError> {
        if rows == 0 || cols == 0 {
            return Err(ClothError::InvalidDimensions { rows, cols });
        }
        if !(spacing > F::zero()) || !spacing.is_finite() {
            return Err(ClothError::InvalidSpacing);
        }
        Ok(GridLayout { rows, cols, spacing })
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Bounds-checked flat index.
    pub fn checked_index(&self, row: usize, col: usize) -> Result<usize, ClothError> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(ClothError::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }

    pub fn particle_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Initial position of the particle at (row, col).
    pub fn rest_position(&self, row: usize, col: usize) -> Vec3<F> {
        let start_x = -F::from_f32((self.cols - 1) as f32) * self.spacing * F::half();
        let start_y = F::from_f32((self.rows - 1) as f32) * self.spacing;
        Vec3::new(
            start_x + F::from_f32(col as f32) * self.spacing,
            start_y - F::from_f32(row as f32) * self.spacing,
            F::zero(),
        )
    }

    /// Lay out particles at rest with the default pins: the two top corners.
    pub fn build_particles(&self, mass: F) -> Result<AllocVec<Particle<F>>, ClothError> {
        let mut particles = AllocVec::with_capacity(self.particle_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                particles.push(Particle::new(self.rest_position(row, col), mass)?);
            }
        }
        particles[self.index(0, 0)].pin();
        particles[self.index(0, self.cols - 1)].pin();
        Ok(particles)
    }

    /// Connect the grid with three spring families.
    ///
    /// - Structural: right and below neighbors (each adjacent pair once)
    /// - Shear: down-right and down-left diagonals
    /// - Bending: two cells right and two cells down
    ///
    /// Rest lengths are measured from `particles`, which must be the grid
    /// just produced by [`build_particles`](Self::build_particles).
    pub fn build_springs(
        &self,
        particles: &[Particle<F>],
        config: &ClothConfig<F>,
    ) -> AllocVec<Spring<F>> {
        let (rows, cols) = (self.rows, self.cols);
        let mut springs = AllocVec::with_capacity(self.spring_count());
        let mut connect = |a: usize, b: usize, kind: SpringKind| {
            let (stiffness, damping) = config.spring_params(kind);
            springs.push(Spring::between(a, b, particles, stiffness, damping, kind));
        };

        for row in 0..rows {
            for col in 0..cols {
                let here = self.index(row, col);

                if col + 1 < cols {
                    connect(here, self.index(row, col + 1), SpringKind::Structural);
                }
                if row + 1 < rows {
                    connect(here, self.index(row + 1, col), SpringKind::Structural);
                }

                if row + 1 < rows && col + 1 < cols {
                    connect(here, self.index(row + 1, col + 1), SpringKind::Shear);
                }
                if row + 1 < rows && col >= 1 {
                    connect(here, self.index(row + 1, col - 1), SpringKind::Shear);
                }

                if col + 2 < cols {
                    connect(here, self.index(row, col + 2), SpringKind::Bending);
                }
                if row + 2 < rows {
                    connect(here, self.index(row + 2, col), SpringKind::Bending);
                }
            }
        }

        springs
    }

    /// Number of springs [`build_springs`](Self::build_springs) creates.
    pub fn spring_count(&self) -> usize {
        let (r, c) = (self.rows, self.cols);
        let structural = r * (c - 1) + c * (r - 1);
        let shear = 2 * (r - 1) * (c - 1);
        let bending = r * c.saturating_sub(2) + c * r.saturating_sub(2);
        structural + shear + bending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: usize, cols: usize) -> (AllocVec<Particle<f32>>, AllocVec<Spring<f32>>) {
        let layout = GridLayout::new(rows, cols, 1.0f32).unwrap();
        let config = ClothConfig::new();
        let particles = layout.build_particles(config.particle_mass).unwrap();
        let springs = layout.build_springs(&particles, &config);
        (particles, springs)
    }

    fn count(springs: &[Spring<f32>], kind: SpringKind) -> usize {
        springs.iter().filter(|s| s.kind == kind).count()
    }

    #[test]
    fn rejects_empty_grid_and_bad_spacing() {
        assert_eq!(
            GridLayout::new(0, 3, 1.0f32),
            Err(ClothError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(GridLayout::new(3, 3, 0.0f32), Err(ClothError::InvalidSpacing));
        assert_eq!(GridLayout::new(3, 3, -1.0f32), Err(ClothError::InvalidSpacing));
    }

    #[test]
    fn spring_family_counts() {
        // 4 rows, 3 cols
        let (_, springs) = build(4, 3);
        // Structural: 4*2 + 3*3 = 17
        assert_eq!(count(&springs, SpringKind::Structural), 17);
        // Shear: 2*3*2 = 12
        assert_eq!(count(&springs, SpringKind::Shear), 12);
        // Bending: 4*1 + 3*2 = 10
        assert_eq!(count(&springs, SpringKind::Bending), 10);
        let layout = GridLayout::new(4, 3, 1.0f32).unwrap();
        assert_eq!(springs.len(), layout.spring_count());
    }

    #[test]
    fn layout_hangs_down_and_is_centered() {
        let layout = GridLayout::new(3, 5, 0.5f32).unwrap();
        let top_left = layout.rest_position(0, 0);
        let top_right = layout.rest_position(0, 4);
        let bottom_left = layout.rest_position(2, 0);
        assert!((top_left.x + top_right.x).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_left.y - 0.0).abs() < 1e-6);
        assert!(bottom_left.y < top_left.y);
    }

    #[test]
    fn default_pins_are_top_corners() {
        let (particles, _) = build(4, 3);
        let pinned: AllocVec<usize> =
            particles.iter().enumerate().filter(|(_, p)| p.pinned).map(|(i, _)| i).collect();
        assert_eq!(pinned, [0, 2]);
    }

    #[test]
    fn no_spring_links_a_particle_to_itself() {
        let (_, springs) = build(5, 5);
        assert!(springs.iter().all(|s| s.a != s.b));
    }

    #[test]
    fn single_particle_grid_has_no_springs() {
        let (particles, springs) = build(1, 1);
        assert_eq!(particles.len(), 1);
        assert!(particles[0].pinned);
        assert!(springs.is_empty());
    }
}
