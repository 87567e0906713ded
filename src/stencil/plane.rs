//! Five-point stencil for the planar problem on a tensor-product grid.
//!
//! Nodes are addressed by [`Index2`] `(i, j)` with `i` along x and `j` along y; every node of the
//! `(Nx + 1) x (Ny + 1)` grid is an unknown. Which formula applies is decided by the set of
//! domain edges the node touches ([`Sides`]), mapped onto a [`Region`].

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::config::PlaneParams;
use crate::error::{FdError, Result};
use crate::grid::Grid;
use crate::stencil::StencilRow;

bitflags! {
    /// Domain edges touched by a node.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Sides: u8 {
        const WEST  = 0b0001; // x = xl, Dirichlet u1
        const EAST  = 0b0010; // x = xr, Robin u2
        const SOUTH = 0b0100; // y = yl, Dirichlet u3
        const NORTH = 0b1000; // y = yr, Dirichlet u4
    }
}

/// Grid node `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index2 {
    pub i: usize,
    pub j: usize,
}

impl Index2 {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl fmt::Display for Index2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Boundary regime of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Interior,
    /// East edge away from the corners.
    Robin,
    DirichletWest,
    DirichletSouth,
    /// North edge including both northern corners.
    DirichletNorth,
    /// `(0, 0)`, where the west and south Dirichlet edges meet.
    LowerLeftCorner,
}

impl Region {
    pub fn classify(sides: Sides) -> Self {
        if sides.is_empty() {
            Region::Interior
        } else if sides == Sides::EAST {
            Region::Robin
        } else if sides.contains(Sides::WEST | Sides::SOUTH) {
            Region::LowerLeftCorner
        } else if sides.contains(Sides::WEST) && !sides.contains(Sides::NORTH) {
            Region::DirichletWest
        } else if sides.contains(Sides::SOUTH) {
            Region::DirichletSouth
        } else {
            Region::DirichletNorth
        }
    }

    pub fn is_dirichlet(self) -> bool {
        !matches!(self, Region::Interior | Region::Robin)
    }
}

/// Row normalisation of the planar stencil.
///
/// Both schemes have the same five couplings: `a`/`b` west and east, `d`/`e` south and north.
/// In row-major node order the `d`/`e` entries sit `Nx + 1` columns away from the diagonal, so
/// the "skip" couplings of the older 9-point layout are exactly these; there is no separate
/// 9-point variant to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneScheme {
    /// Conservative rows divided by the control volume.
    #[default]
    FivePoint,
    /// Non-Dirichlet rows multiplied by `hbar_y^2`, making the vertical couplings `-1` on a
    /// uniform y-grid.
    FivePointScaled,
}

impl std::str::FromStr for PlaneScheme {
    type Err = FdError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "five-point" => Ok(PlaneScheme::FivePoint),
            "five-point-scaled" => Ok(PlaneScheme::FivePointScaled),
            _ => Err(FdError::Unsupported("unknown plane scheme")),
        }
    }
}

/// Stencil calculator for [`PlaneParams`] on an x/y grid pair.
#[derive(Debug, Clone)]
pub struct PlaneStencil {
    params: Arc<PlaneParams>,
    x: Grid,
    y: Grid,
    scheme: PlaneScheme,
}

impl PlaneStencil {
    pub fn new(params: Arc<PlaneParams>, x: Grid, y: Grid) -> Self {
        Self { params, x, y, scheme: PlaneScheme::default() }
    }

    pub fn with_scheme(mut self, scheme: PlaneScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme(&self) -> PlaneScheme {
        self.scheme
    }

    pub fn x_grid(&self) -> &Grid {
        &self.x
    }

    pub fn y_grid(&self) -> &Grid {
        &self.y
    }

    fn nx(&self) -> usize {
        self.x.last_index()
    }

    fn ny(&self) -> usize {
        self.y.last_index()
    }

    /// Total number of nodes (rows of the assembled system).
    pub fn unknowns(&self) -> usize {
        self.x.len() * self.y.len()
    }

    /// Row-major position of `index` in the flattened system.
    pub fn flat(&self, index: Index2) -> usize {
        index.j * self.x.len() + index.i
    }

    pub fn unflat(&self, row: usize) -> Index2 {
        Index2::new(row % self.x.len(), row / self.x.len())
    }

    fn check(&self, index: Index2) -> Result<()> {
        if index.i >= self.x.len() {
            return Err(FdError::IndexOutOfRange { index: index.i, len: self.x.len() });
        }
        if index.j >= self.y.len() {
            return Err(FdError::IndexOutOfRange { index: index.j, len: self.y.len() });
        }
        Ok(())
    }

    pub fn sides(&self, index: Index2) -> Result<Sides> {
        self.check(index)?;
        let mut sides = Sides::empty();
        sides.set(Sides::WEST, index.i == 0);
        sides.set(Sides::EAST, index.i == self.nx());
        sides.set(Sides::SOUTH, index.j == 0);
        sides.set(Sides::NORTH, index.j == self.ny());
        Ok(sides)
    }

    pub fn region(&self, index: Index2) -> Result<Region> {
        Ok(Region::classify(self.sides(index)?))
    }

    /// West neighbour coefficient; refused at `i == 0`.
    pub fn a(&self, index: Index2) -> Result<f64> {
        self.check(index)?;
        if index.i == 0 {
            return Err(FdError::MissingNeighbor { side: "west", index: index.to_string() });
        }
        Ok(self.row(index)?.a)
    }

    /// East neighbour coefficient; refused at `i == Nx`.
    pub fn b(&self, index: Index2) -> Result<f64> {
        self.check(index)?;
        if index.i == self.nx() {
            return Err(FdError::MissingNeighbor { side: "east", index: index.to_string() });
        }
        Ok(self.row(index)?.b)
    }

    pub fn c(&self, index: Index2) -> Result<f64> {
        Ok(self.row(index)?.c)
    }

    /// South neighbour coefficient; refused at `j == 0`.
    pub fn d(&self, index: Index2) -> Result<f64> {
        self.check(index)?;
        if index.j == 0 {
            return Err(FdError::MissingNeighbor { side: "south", index: index.to_string() });
        }
        Ok(self.row(index)?.d)
    }

    /// North neighbour coefficient; refused at `j == Ny`.
    pub fn e(&self, index: Index2) -> Result<f64> {
        self.check(index)?;
        if index.j == self.ny() {
            return Err(FdError::MissingNeighbor { side: "north", index: index.to_string() });
        }
        Ok(self.row(index)?.e)
    }

    pub fn g(&self, index: Index2) -> Result<f64> {
        Ok(self.row(index)?.g)
    }

    /// Full row at `index`; coefficients toward missing sides are zero.
    pub fn row(&self, index: Index2) -> Result<StencilRow> {
        let region = self.region(index)?;
        let p = &self.params;
        let (x, y) = (self.x.points()[index.i], self.y.points()[index.j]);
        let row = match region {
            Region::LowerLeftCorner => self.lower_left_corner(),
            Region::DirichletWest => dirichlet((p.u1)(y)),
            Region::DirichletSouth => dirichlet((p.u3)(x)),
            Region::DirichletNorth => dirichlet((p.u4)(x)),
            Region::Interior => self.interior(index)?,
            Region::Robin => self.robin(index)?,
        };
        if region.is_dirichlet() {
            return Ok(row);
        }
        Ok(match self.scheme {
            PlaneScheme::FivePoint => row,
            PlaneScheme::FivePointScaled => {
                let s = self.y.cross_spacing(index.j)?.powi(2);
                StencilRow {
                    a: row.a * s,
                    b: row.b * s,
                    c: row.c * s,
                    d: row.d * s,
                    e: row.e * s,
                    g: row.g * s,
                }
            }
        })
    }

    /// Row at `(0, 0)`.
    ///
    /// Two Dirichlet edges meet here and the west value `u1(y_0)` is used with a unit diagonal.
    /// Whether `u3(x_0)` is the intended value is unresolved; keep this formula isolated so it
    /// can be changed on its own.
    pub fn lower_left_corner(&self) -> StencilRow {
        dirichlet((self.params.u1)(self.y.points()[0]))
    }

    /// Vertical couplings `(d, e)` of an interior row `j`.
    fn vertical(&self, j: usize) -> Result<(f64, f64)> {
        let hby = self.y.cross_spacing(j)?;
        let d = -1.0 / (self.y.spacing(j)? * hby);
        let e = -1.0 / (self.y.spacing(j + 1)? * hby);
        Ok((d, e))
    }

    fn interior(&self, index: Index2) -> Result<StencilRow> {
        let Index2 { i, j } = index;
        let k1 = &self.params.k1;
        let hbx = self.x.cross_spacing(i)?;
        let a = -k1(self.x.midpoint(i)?) / (self.x.spacing(i)? * hbx);
        let b = -k1(self.x.midpoint(i + 1)?) / (self.x.spacing(i + 1)? * hbx);
        let (d, e) = self.vertical(j)?;
        Ok(StencilRow {
            a,
            b,
            c: -(a + b + d + e),
            d,
            e,
            g: (self.params.f)(self.x.points()[i], self.y.points()[j]),
        })
    }

    fn robin(&self, index: Index2) -> Result<StencilRow> {
        let Index2 { i, j } = index;
        let p = &self.params;
        let hbx = self.x.cross_spacing(i)?;
        let a = -(p.k1)(self.x.midpoint(i)?) / (self.x.spacing(i)? * hbx);
        let (d, e) = self.vertical(j)?;
        let (x, y) = (self.x.points()[i], self.y.points()[j]);
        Ok(StencilRow {
            a,
            b: 0.0,
            c: -(a + d + e) + p.hi2 / hbx,
            d,
            e,
            g: (p.f)(x, y) + (p.u2)(y) / hbx,
        })
    }
}

fn dirichlet(value: f64) -> StencilRow {
    StencilRow { c: 1.0, g: value, ..StencilRow::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> Arc<PlaneParams> {
        Arc::new(PlaneParams {
            xl: 0.0,
            xr: 1.0,
            yl: 0.0,
            yr: 1.0,
            k1: Arc::new(|_| 2.0),
            hi2: 5.0,
            f: Arc::new(|x, y| x + y),
            u1: Arc::new(|y| 10.0 + y),
            u2: Arc::new(|y| 100.0 + y),
            u3: Arc::new(|x| 20.0 + x),
            u4: Arc::new(|x| 30.0 + x),
        })
    }

    fn stencil() -> PlaneStencil {
        PlaneStencil::new(
            params(),
            Grid::uniform(0.0, 1.0, 4).unwrap(),
            Grid::uniform(0.0, 1.0, 2).unwrap(),
        )
    }

    #[test]
    fn classification_covers_edges_and_corners() {
        let s = stencil();
        assert_eq!(s.region(Index2::new(0, 0)).unwrap(), Region::LowerLeftCorner);
        assert_eq!(s.region(Index2::new(0, 1)).unwrap(), Region::DirichletWest);
        assert_eq!(s.region(Index2::new(0, 2)).unwrap(), Region::DirichletNorth);
        assert_eq!(s.region(Index2::new(2, 0)).unwrap(), Region::DirichletSouth);
        assert_eq!(s.region(Index2::new(4, 0)).unwrap(), Region::DirichletSouth);
        assert_eq!(s.region(Index2::new(4, 1)).unwrap(), Region::Robin);
        assert_eq!(s.region(Index2::new(4, 2)).unwrap(), Region::DirichletNorth);
        assert_eq!(s.region(Index2::new(2, 1)).unwrap(), Region::Interior);
        assert!(s.region(Index2::new(5, 1)).is_err());
        assert!(s.region(Index2::new(1, 3)).is_err());
    }

    #[test]
    fn interior_row_is_conservative() {
        let s = stencil();
        let row = s.row(Index2::new(2, 1)).unwrap();
        // hx = 0.25, hy = 0.5, k1 = 2
        assert_relative_eq!(row.a, -2.0 / 0.0625, epsilon = 1e-12);
        assert_relative_eq!(row.b, -2.0 / 0.0625, epsilon = 1e-12);
        assert_relative_eq!(row.d, -4.0, epsilon = 1e-12);
        assert_relative_eq!(row.e, -4.0, epsilon = 1e-12);
        assert_relative_eq!(row.c, 64.0 + 8.0, epsilon = 1e-12);
        assert_relative_eq!(row.g, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn robin_row_uses_half_volume() {
        let s = stencil();
        let row = s.row(Index2::new(4, 1)).unwrap();
        let hbx = 0.125;
        assert_relative_eq!(row.a, -2.0 / (0.25 * hbx), epsilon = 1e-12);
        assert_eq!(row.b, 0.0);
        assert_relative_eq!(row.c, -(row.a + row.d + row.e) + 5.0 / hbx, epsilon = 1e-12);
        assert_relative_eq!(row.g, 1.5 + 100.5 / hbx, epsilon = 1e-12);
        assert!(matches!(s.b(Index2::new(4, 1)), Err(FdError::MissingNeighbor { side: "east", .. })));
    }

    #[test]
    fn dirichlet_rows_are_identity() {
        let s = stencil();
        let west = s.row(Index2::new(0, 1)).unwrap();
        assert_eq!(west, StencilRow { c: 1.0, g: 10.5, ..StencilRow::default() });
        let south = s.row(Index2::new(3, 0)).unwrap();
        assert_eq!(south.g, 20.75);
        assert_eq!(s.a(Index2::new(3, 0)).unwrap(), 0.0);
        let north = s.row(Index2::new(1, 2)).unwrap();
        assert_eq!(north.g, 30.25);
    }

    #[test]
    fn lower_left_corner_takes_west_value() {
        let s = stencil();
        let row = s.row(Index2::new(0, 0)).unwrap();
        assert_eq!(row.c, 1.0);
        assert_eq!(row.g, 10.0);
        assert_eq!(row, s.lower_left_corner());
    }

    #[test]
    fn missing_sides_are_refused() {
        let s = stencil();
        assert!(matches!(s.a(Index2::new(0, 1)), Err(FdError::MissingNeighbor { side: "west", .. })));
        assert!(matches!(s.d(Index2::new(2, 0)), Err(FdError::MissingNeighbor { side: "south", .. })));
        assert!(matches!(s.e(Index2::new(2, 2)), Err(FdError::MissingNeighbor { side: "north", .. })));
        assert!(s.c(Index2::new(9, 9)).is_err());
    }

    #[test]
    fn scaled_scheme_multiplies_by_vertical_width() {
        let s = stencil().with_scheme(PlaneScheme::FivePointScaled);
        let row = s.row(Index2::new(2, 1)).unwrap();
        assert_relative_eq!(row.d, -1.0, epsilon = 1e-12);
        assert_relative_eq!(row.e, -1.0, epsilon = 1e-12);
        assert_relative_eq!(row.g, 0.25, epsilon = 1e-12);
        assert_eq!(s.row(Index2::new(0, 1)).unwrap().c, 1.0);
    }

    #[test]
    fn flat_ordering_is_row_major() {
        let s = stencil();
        assert_eq!(s.unknowns(), 15);
        assert_eq!(s.flat(Index2::new(2, 1)), 7);
        assert_eq!(s.unflat(7), Index2::new(2, 1));
    }
}
