#[cfg(test)]
mod tests {
    use brillouin::atoms::{Atoms, Coordinates};
    use brillouin::lattice::{BravaisLattice, Centering, Convention,
                             LatticeGeometry};
    use brillouin::space_group::decorate;
    use brillouin::tolerance::Tolerance;
    use brillouin::utils;
    use std::f64::consts::PI;

    const RIGHT: [f64; 3] = [PI / 2., PI / 2., PI / 2.];

    fn geometry(centering: Centering,
                lengths: [f64; 3],
                angles: [f64; 3])
                -> LatticeGeometry {
        match LatticeGeometry::new(centering,
                                   lengths,
                                   angles,
                                   Convention::Ordinary,
                                   &Tolerance::default(),
                                   2)
        {
            Ok(g) => g,
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn symmetry_bravais_point_group_orders() {
        let hexagonal = [PI / 2., PI / 2., 2. * PI / 3.];
        let monoclinic = [1.2, PI / 2., PI / 2.];
        let cases = [(Centering::Primitive, [1., 1., 1.], RIGHT,
                      BravaisLattice::SimpleCubic),
                     (Centering::Body, [1., 1., 1.], RIGHT,
                      BravaisLattice::BodyCenteredCubic),
                     (Centering::Face, [1., 1., 1.], RIGHT,
                      BravaisLattice::FaceCenteredCubic),
                     (Centering::Primitive, [1., 1., 1.6], RIGHT,
                      BravaisLattice::Tetragonal),
                     (Centering::Body, [1., 1., 1.6], RIGHT,
                      BravaisLattice::BodyCenteredTetragonal),
                     (Centering::Primitive, [1., 1.2, 1.5], RIGHT,
                      BravaisLattice::Orthorhombic),
                     (Centering::Base, [1., 1.2, 1.5], RIGHT,
                      BravaisLattice::BaseCenteredOrthorhombic),
                     (Centering::Body, [1., 1.2, 1.5], RIGHT,
                      BravaisLattice::BodyCenteredOrthorhombic),
                     (Centering::Face, [1., 1.2, 1.5], RIGHT,
                      BravaisLattice::FaceCenteredOrthorhombic),
                     (Centering::Primitive, [1., 1., 1.6], hexagonal,
                      BravaisLattice::Hexagonal),
                     (Centering::Primitive, [1., 1., 1.], [1., 1., 1.],
                      BravaisLattice::Rhombohedral),
                     (Centering::Primitive, [1., 1.2, 1.5], monoclinic,
                      BravaisLattice::Monoclinic),
                     (Centering::Base, [1., 1.2, 1.5], monoclinic,
                      BravaisLattice::BaseCenteredMonoclinic),
                     (Centering::Primitive, [1., 1.3, 1.7], [1.3, 1.4, 1.5],
                      BravaisLattice::Triclinic)];
        for (centering, lengths, angles, expected) in cases.iter() {
            let g = geometry(*centering, *lengths, *angles);
            assert_eq!(g.lattice_type, *expected);
            assert_eq!(g.point_group.len(),
                       expected.family().point_group_order(),
                       "{}",
                       expected);
        }
    }

    #[test]
    fn symmetry_operators_orthogonal() {
        let g = geometry(Centering::Primitive, [1., 1., 1.6],
                         [PI / 2., PI / 2., 2. * PI / 3.]);
        let identity = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        for op in g.point_group.operators.iter() {
            let square = utils::matmul(*op, utils::transpose(*op));
            assert!(utils::matrix_close(square, identity, 0., 1e-8));
        }
    }

    #[test]
    fn symmetry_reciprocal_point_group() {
        let g = geometry(Centering::Body, [1., 1., 1.6], RIGHT);
        let tol = Tolerance::default();
        for op in g.point_group.operators.iter() {
            for v in g.reciprocal.to_cartesian.iter() {
                let image = utils::matvec(*op, *v);
                let f = g.reciprocal.fractional(image);
                assert!(tol.all_close(f, [f[0].round(), f[1].round(), f[2].round()]));
            }
        }
    }

    #[test]
    fn symmetry_diamond() {
        let tol = Tolerance::default();
        let g = geometry(Centering::Face, [1., 1., 1.], RIGHT);
        let atoms = match Atoms::new(vec![String::from("Si"), String::from("Si")],
                                     vec![[0.; 3], [0.25; 3]],
                                     Coordinates::Cartesian)
        {
            Ok(a) => a,
            Err(e) => panic!("{}", e),
        };
        let group = match decorate(&g.real, &g.point_group, &atoms, &tol) {
            Ok(s) => s,
            Err(e) => panic!("{}", e),
        };
        assert_eq!(group.len(), 48);
        assert_eq!(group.translations
                        .iter()
                        .filter(|t| tol.all_close(**t, [0.; 3]))
                        .count(),
                   24)
    }
}
