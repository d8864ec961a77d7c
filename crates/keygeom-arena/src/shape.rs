//! Shapes, their outlines, and outline points.

use keygeom_core::{Atom, GeomError, RecordKind};

use crate::slots::{Record, SlotArray};

/// A coordinate pair, in tenths of a millimetre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    /// Horizontal offset.
    pub x: i16,
    /// Vertical offset.
    pub y: i16,
}

impl Point {
    /// Create a point.
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl Record for Point {
    const KIND: RecordKind = RecordKind::Point;
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Left edge.
    pub x1: i16,
    /// Top edge.
    pub y1: i16,
    /// Right edge.
    pub x2: i16,
    /// Bottom edge.
    pub y2: i16,
}

impl Bounds {
    /// Inverted box that any [`include`](Self::include) call will replace.
    pub(crate) const INVERTED: Bounds = Bounds {
        x1: i16::MAX,
        y1: i16::MAX,
        x2: i16::MIN,
        y2: i16::MIN,
    };

    /// Grow the box to cover `(x, y)`.
    pub fn include(&mut self, x: i16, y: i16) {
        self.x1 = self.x1.min(x);
        self.y1 = self.y1.min(y);
        self.x2 = self.x2.max(x);
        self.y2 = self.y2.max(y);
    }

    /// Horizontal extent.
    pub fn width(&self) -> i32 {
        i32::from(self.x2) - i32::from(self.x1)
    }

    /// Vertical extent.
    pub fn height(&self) -> i32 {
        i32::from(self.y2) - i32::from(self.y1)
    }
}

/// A closed path belonging to a shape.
///
/// One point describes a rectangle from the origin to that point, two
/// points describe opposite corners, three or more describe a polygon.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    /// Radius used to round the corners.
    pub corner_radius: u16,
    pub(crate) points: SlotArray<Point>,
}

impl Outline {
    /// The outline's points.
    pub fn points(&self) -> &SlotArray<Point> {
        &self.points
    }

    /// The outline's points, mutably.
    pub fn points_mut(&mut self) -> &mut [Point] {
        self.points.as_mut_slice()
    }

    /// Reserve room for `n` more points.
    pub fn alloc_points(&mut self, n: usize) -> Result<(), GeomError> {
        self.points.reserve(n)
    }

    /// Remove points `[first, first + n)`, or all of them.
    pub fn free_points(&mut self, first: usize, n: usize, free_all: bool) {
        self.points.free(first, n, free_all);
    }

    /// Append a point.
    pub fn add_point(&mut self, point: Point) -> Result<&mut Point, GeomError> {
        self.points.push_with(point)
    }
}

impl Record for Outline {
    const KIND: RecordKind = RecordKind::Outline;

    fn release(&mut self) {
        self.points.clear();
    }
}

/// A named outline template shared by keys and doodads.
///
/// Two outlines may be singled out: `primary` (drawn) and `approx` (a
/// cheaper approximation). Both are stored as indices into the shape's own
/// outline array and are adjusted when outlines are removed, so they never
/// point at a different outline than the one designated.
#[derive(Clone, Debug, Default)]
pub struct Shape {
    /// Interned shape name; the find-or-create key.
    pub name: Atom,
    /// Cached extent, refreshed by [`compute_bounds`](Self::compute_bounds).
    pub bounds: Bounds,
    pub(crate) outlines: SlotArray<Outline>,
    primary: Option<usize>,
    approx: Option<usize>,
}

impl Shape {
    /// Create an empty shape called `name`.
    pub fn new(name: Atom) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// The shape's outlines.
    pub fn outlines(&self) -> &SlotArray<Outline> {
        &self.outlines
    }

    /// The shape's outlines, mutably.
    pub fn outlines_mut(&mut self) -> &mut [Outline] {
        self.outlines.as_mut_slice()
    }

    /// Reserve room for `n` more outlines.
    pub fn alloc_outlines(&mut self, n: usize) -> Result<(), GeomError> {
        self.outlines.reserve(n)
    }

    /// Remove outlines `[first, first + n)`, or all of them.
    ///
    /// A distinguished outline that is removed is forgotten; one that sits
    /// past the removed range follows its outline down.
    pub fn free_outlines(&mut self, first: usize, n: usize, free_all: bool) {
        let len = self.outlines.len();
        if free_all {
            self.primary = None;
            self.approx = None;
        } else if first < len && n > 0 {
            let n = n.min(len - first);
            self.primary = shift_after_removal(self.primary, first, n);
            self.approx = shift_after_removal(self.approx, first, n);
        }
        self.outlines.free(first, n, free_all);
    }

    /// Append an outline with room for `sz_points` points.
    ///
    /// If the point reservation fails no outline is appended.
    pub fn add_outline(&mut self, sz_points: usize) -> Result<&mut Outline, GeomError> {
        let mut outline = Outline::default();
        outline.alloc_points(sz_points)?;
        self.outlines.push_with(outline)
    }

    /// Designate outline `index` as the primary outline.
    pub fn set_primary(&mut self, index: usize) -> Result<(), GeomError> {
        self.primary = Some(self.check_outline(index)?);
        Ok(())
    }

    /// Designate outline `index` as the approximating outline.
    pub fn set_approx(&mut self, index: usize) -> Result<(), GeomError> {
        self.approx = Some(self.check_outline(index)?);
        Ok(())
    }

    /// Index of the primary outline.
    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    /// Index of the approximating outline.
    pub fn approx_index(&self) -> Option<usize> {
        self.approx
    }

    /// The primary outline, if designated and still present.
    pub fn primary(&self) -> Option<&Outline> {
        self.outlines.get(self.primary?)
    }

    /// The approximating outline, if designated and still present.
    pub fn approx(&self) -> Option<&Outline> {
        self.outlines.get(self.approx?)
    }

    /// Recompute [`bounds`](Self::bounds) from every outline's points.
    ///
    /// Outlines with fewer than two points are anchored at the origin.
    /// Returns `None`, leaving `bounds` untouched, if there are no outlines.
    pub fn compute_bounds(&mut self) -> Option<Bounds> {
        if self.outlines.is_empty() {
            return None;
        }
        let mut bounds = Bounds::INVERTED;
        for outline in &self.outlines {
            for pt in &outline.points {
                bounds.include(pt.x, pt.y);
            }
            if outline.points.len() < 2 {
                bounds.include(0, 0);
            }
        }
        self.bounds = bounds;
        Some(bounds)
    }

    fn check_outline(&self, index: usize) -> Result<usize, GeomError> {
        if index < self.outlines.len() {
            Ok(index)
        } else {
            Err(GeomError::IndexOutOfRange {
                kind: RecordKind::Outline,
                index,
                len: self.outlines.len(),
            })
        }
    }
}

impl Record for Shape {
    const KIND: RecordKind = RecordKind::Shape;

    fn release(&mut self) {
        self.free_outlines(0, 0, true);
    }
}

/// Where a stored index lands after `[first, first + n)` is removed.
pub(crate) fn shift_after_removal(index: Option<usize>, first: usize, n: usize) -> Option<usize> {
    let index = index?;
    if index < first {
        Some(index)
    } else if index < first + n {
        None
    } else {
        Some(index - n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_with_outlines(n: usize) -> Shape {
        let mut shape = Shape::new(Atom(1));
        for i in 0..n {
            let outline = shape.add_outline(1).unwrap();
            outline.corner_radius = i as u16;
            outline.add_point(Point::new(10, 10)).unwrap();
        }
        shape
    }

    #[test]
    fn add_outline_reserves_points() {
        let mut shape = Shape::default();
        let outline = shape.add_outline(4).unwrap();
        assert_eq!(outline.points().capacity(), 4);
        assert_eq!(outline.points().len(), 0);
        assert_eq!(shape.outlines().len(), 1);
    }

    #[test]
    fn failed_point_reservation_adds_no_outline() {
        let mut shape = shape_with_outlines(2);
        let err = shape.add_outline(crate::MAX_SLOTS + 1).unwrap_err();
        assert!(matches!(
            err,
            GeomError::AllocFailed {
                kind: RecordKind::Point,
                ..
            }
        ));
        assert_eq!(shape.outlines().len(), 2);
    }

    #[test]
    fn distinguished_outlines_follow_compaction() {
        let mut shape = shape_with_outlines(4);
        shape.set_primary(3).unwrap();
        shape.set_approx(1).unwrap();
        shape.free_outlines(1, 1, false);
        assert_eq!(shape.approx_index(), None);
        assert_eq!(shape.primary_index(), Some(2));
        assert_eq!(shape.primary().unwrap().corner_radius, 3);
    }

    #[test]
    fn distinguished_outlines_survive_growth() {
        let mut shape = shape_with_outlines(1);
        shape.set_primary(0).unwrap();
        shape.alloc_outlines(100).unwrap();
        for _ in 0..10 {
            shape.add_outline(0).unwrap();
        }
        assert_eq!(shape.primary().unwrap().corner_radius, 0);
        assert_eq!(shape.primary().unwrap().points().len(), 1);
    }

    #[test]
    fn set_primary_rejects_missing_outline() {
        let mut shape = shape_with_outlines(2);
        let err = shape.set_primary(2).unwrap_err();
        assert!(matches!(
            err,
            GeomError::IndexOutOfRange {
                kind: RecordKind::Outline,
                index: 2,
                len: 2
            }
        ));
    }

    #[test]
    fn free_all_forgets_distinguished_outlines() {
        let mut shape = shape_with_outlines(2);
        shape.set_primary(0).unwrap();
        shape.free_outlines(5, 5, true);
        assert!(shape.primary().is_none());
        assert!(!shape.outlines().is_allocated());
    }

    #[test]
    fn outline_release_frees_points() {
        let mut outline = Outline::default();
        outline.add_point(Point::new(1, 2)).unwrap();
        outline.release();
        assert!(!outline.points().is_allocated());
    }

    #[test]
    fn bounds_cover_points_and_origin_for_short_outlines() {
        let mut shape = Shape::default();
        let o = shape.add_outline(1).unwrap();
        o.add_point(Point::new(180, 180)).unwrap();
        let o = shape.add_outline(2).unwrap();
        o.add_point(Point::new(10, 20)).unwrap();
        o.add_point(Point::new(170, -5)).unwrap();
        let b = shape.compute_bounds().unwrap();
        assert_eq!(
            b,
            Bounds {
                x1: 0,
                y1: -5,
                x2: 180,
                y2: 180
            }
        );
        assert_eq!(b.width(), 180);
        assert_eq!(shape.bounds, b);
    }

    #[test]
    fn bounds_need_outlines() {
        assert_eq!(Shape::default().compute_bounds(), None);
    }

    #[test]
    fn shift_after_removal_cases() {
        assert_eq!(shift_after_removal(Some(0), 1, 2), Some(0));
        assert_eq!(shift_after_removal(Some(1), 1, 2), None);
        assert_eq!(shift_after_removal(Some(2), 1, 2), None);
        assert_eq!(shift_after_removal(Some(3), 1, 2), Some(1));
        assert_eq!(shift_after_removal(None, 0, 1), None);
    }
}
