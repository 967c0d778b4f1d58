use anyhow::{Context, Result};
use brillouin::arguments::{Args, ClapApp};
use brillouin::atoms::Coordinates;
use brillouin::io;
use brillouin::lattice::LatticeGeometry;
use brillouin::orbits::{map_to_bz, reduce_grid};
use brillouin::progress::Bar;
use brillouin::sampling::make_cell_points;
use brillouin::space_group::decorate;
use brillouin::utils::scale;
use env_logger::Env;
use log::info;

fn main() -> Result<()> {
    // argument parsing
    let app = ClapApp::App.get();
    let args = Args::new(app.get_matches())?;
    env_logger::Builder::from_env(Env::default().default_filter_or(args.verbosity.to_string())).init();
    // print splash
    println!("Brillouin Zone Reduction ({})", env!("CARGO_PKG_VERSION"));
    println!("Running on {} threads.", args.threads);
    let tolerance = args.tolerance;
    let geometry = LatticeGeometry::new(args.centering,
                                        args.lengths,
                                        args.angles,
                                        args.convention,
                                        &tolerance,
                                        args.threads).context("Failed to build the lattice")?;
    info!("Found a {} lattice with {} point group operators.",
          geometry.lattice_type,
          geometry.point_group.len());
    let space_group = decorate(&geometry.real,
                               &geometry.point_group,
                               &args.atoms,
                               &tolerance).context("Failed to find the space group")?;
    // the grid steps are the reciprocal vectors divided by the divisions
    let reciprocal = geometry.reciprocal.to_cartesian;
    let mut grid_vectors = [[0f64; 3]; 3];
    for (i, v) in grid_vectors.iter_mut().enumerate() {
        *v = scale(1. / args.grid[i] as f64, reciprocal[i]);
    }
    let points = make_cell_points(&geometry.reciprocal,
                                  &grid_vectors,
                                  args.shift,
                                  &tolerance).context("Failed to generate the k-point grid")?;
    let pbar = Bar::visible(points.len() as u64,
                            100,
                            String::from("Reducing K-Points: "));
    let reduced = if args.bz {
        map_to_bz(&points,
                  &geometry.reciprocal,
                  &grid_vectors,
                  args.shift,
                  &space_group,
                  &tolerance,
                  pbar)
    } else {
        reduce_grid(&points,
                    &geometry.reciprocal,
                    &grid_vectors,
                    args.shift,
                    &space_group,
                    &tolerance,
                    pbar)
    }.context("Failed to reduce the k-point grid")?;
    let kpoints = match args.coordinates {
        Coordinates::Lattice => reduced.in_lattice_coordinates(&geometry.reciprocal),
        Coordinates::Cartesian => reduced.points.clone(),
    };
    let mut kpoints_file =
        io::output::kpoints_file(&kpoints, &reduced, args.coordinates);
    kpoints_file.push_str(&io::output::footer(geometry.lattice_type,
                                              space_group.rotations(&tolerance)
                                                         .len(),
                                              &reduced));
    kpoints_file.push('\n');
    // table of representatives followed by the totals
    io::output::write(kpoints_file, args.output.clone()).with_context(|| {
                         format!("Failed to write {}", args.output)
                     })?;
    println!("Wrote {} irreducible k-points to {}.",
             reduced.len(),
             args.output);
    Ok(())
}
