use crate::atoms::{Atoms, Coordinates};
use crate::lattice::{Centering, Convention};
use crate::tolerance::Tolerance;
use anyhow::{anyhow, Context, Result};
use clap::{crate_authors, Arg, ArgMatches, Command};
use log::LevelFilter;
use regex::Regex;
use std::str::FromStr;

/// Create a container for dealing with clap and being able to test arg parsing
pub enum ClapApp {
    App,
}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get(&self) -> Command<'static> {
        Command::new("Brillouin Zone Reduction")
            .author(crate_authors!())
            .version(env!("CARGO_PKG_VERSION"))
            .arg(Arg::new("centering")
                .short('c')
                .long("centering")
                .takes_value(true)
                .required(true)
                .possible_values(["prim", "base", "body", "face"])
                .help("Centering of the conventional cell."))
            .arg(Arg::new("lengths")
                .short('l')
                .long("lengths")
                .takes_value(true)
                .required(true)
                .number_of_values(3)
                .value_names(&["a", "b", "c"])
                .help("Lengths of the conventional lattice vectors."))
            .arg(Arg::new("angles")
                .short('a')
                .long("angles")
                .takes_value(true)
                .required(true)
                .number_of_values(3)
                .value_names(&["alpha", "beta", "gamma"])
                .help("Angles between the conventional lattice vectors.")
                .long_help(
"The angles alpha (between b and c), beta (between a and c) and gamma (between
a and b). These are read in radians unless --degrees is passed."))
            .arg(Arg::new("degrees")
                .long("degrees")
                .takes_value(false)
                .help("Read the angles in degrees."))
            .arg(Arg::new("convention")
                .long("convention")
                .takes_value(true)
                .possible_values(["ordinary", "angular"])
                .default_value("ordinary")
                .help("Whether the reciprocal lattice carries a factor of 2pi."))
            .arg(Arg::new("grid")
                .short('g')
                .long("grid")
                .takes_value(true)
                .required(true)
                .number_of_values(3)
                .value_names(&["n1", "n2", "n3"])
                .help("Divisions of each reciprocal lattice vector.")
                .long_help(
"The k-point grid is generated by the reciprocal lattice vectors divided by n1,
n2 and n3 respectively."))
            .arg(Arg::new("shift")
                .short('s')
                .long("shift")
                .takes_value(true)
                .number_of_values(3)
                .allow_hyphen_values(true)
                .default_values(&["0", "0", "0"])
                .help("Offset of the grid in grid coordinates.")
                .long_help(
"Offset of the k-point grid in units of the grid vectors, 0.5 0.5 0.5 gives a
grid shifted by half a step in every direction."))
            .arg(Arg::new("atom")
                .long("atom")
                .takes_value(true)
                .multiple_occurrences(true)
                .number_of_values(1)
                .allow_hyphen_values(true)
                .help("An atom decorating the lattice, \"LABEL x y z\".")
                .long_help(
"An atom in the cell given as its label followed by its position, for example
--atom \"Si 0.25 0.25 0.25\". Positions are in lattice coordinates unless
--cartesian is passed. Repeat the flag for each atom. Without atoms the
symmetry of the bare lattice is used."))
            .arg(Arg::new("cartesian")
                .long("cartesian")
                .takes_value(false)
                .help("Read the atom positions as Cartesian coordinates."))
            .arg(Arg::new("rtol")
                .long("rtol")
                .takes_value(true)
                .default_value("1e-4")
                .help("Relative tolerance of floating point comparisons."))
            .arg(Arg::new("atol")
                .long("atol")
                .takes_value(true)
                .default_value("1e-6")
                .help("Absolute tolerance of floating point comparisons."))
            .arg(Arg::new("eps")
                .long("eps")
                .takes_value(true)
                .default_value("1e-9")
                .help("Precision of norm comparisons."))
            .arg(Arg::new("decimals")
                .long("decimals")
                .takes_value(true)
                .default_value("4")
                .help("Decimal places kept when hashing grid coordinates."))
            .arg(Arg::new("bz")
                .long("bz")
                .takes_value(false)
                .help("Map the reduced k-points into the first Brillouin zone."))
            .arg(Arg::new("lattice coordinates")
                .long("lattice-coords")
                .takes_value(false)
                .help("Write the k-points in reciprocal lattice coordinates."))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .takes_value(true)
                .default_value("IRKPTS.dat")
                .help("File to write the reduced k-points to."))
            .arg(Arg::new("threads")
                .short('J')
                .long("threads")
                .takes_value(true)
                .default_value("0")
                .help("Number of threads to distribute the symmetry search over.")
                .long_help(
"The number of threads to be used by the program. A default value of 0 uses
every available core."))
            .arg(Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .takes_value(false)
                .help("Increase the logging verbosity, repeat for more."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub centering: Centering,
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
    pub convention: Convention,
    pub grid: [u32; 3],
    pub shift: [f64; 3],
    pub atoms: Atoms,
    pub tolerance: Tolerance,
    pub bz: bool,
    pub coordinates: Coordinates,
    pub output: String,
    pub threads: usize,
    pub verbosity: LevelFilter,
}

/// Parses a flag that takes three values.
fn triple<T>(arguments: &ArgMatches, name: &str) -> Result<[T; 3]>
    where T: FromStr + Copy + Default,
          <T as FromStr>::Err: std::error::Error + Send + Sync + 'static
{
    let values = arguments.values_of(name)
                          .with_context(|| format!("Missing values for {}", name))?
                          .collect::<Vec<&str>>();
    if values.len() != 3 {
        return Err(anyhow!("{} takes 3 values, found {}", name, values.len()));
    }
    let mut out = [T::default(); 3];
    for (o, v) in out.iter_mut().zip(values.iter()) {
        *o = v.parse::<T>()
              .with_context(|| format!("Couldn't parse {} from \"{}\"", name, v))?;
    }
    Ok(out)
}

/// Parses a flag with a single value.
fn single<T>(arguments: &ArgMatches, name: &str) -> Result<T>
    where T: FromStr,
          <T as FromStr>::Err: std::error::Error + Send + Sync + 'static
{
    let value = arguments.value_of(name)
                         .with_context(|| format!("Missing value for {}", name))?;
    value.parse::<T>()
         .with_context(|| format!("Couldn't parse {} from \"{}\"", name, value))
}

/// Reads "LABEL x y z" strings into the atoms decorating the lattice.
pub fn parse_atoms(atoms: &[&str], coordinates: Coordinates) -> Result<Atoms> {
    let re = Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s*$")?;
    let mut labels = Vec::with_capacity(atoms.len());
    let mut positions = Vec::with_capacity(atoms.len());
    for atom in atoms.iter() {
        let captures = re.captures(atom).with_context(|| {
                             format!("Couldn't read \"{}\" as \"LABEL x y z\"", atom)
                         })?;
        let mut position = [0f64; 3];
        for (i, p) in position.iter_mut().enumerate() {
            *p = captures[i + 2].parse::<f64>().with_context(|| {
                     format!("Couldn't parse the position of \"{}\"", atom)
                 })?;
        }
        labels.push(String::from(&captures[1]));
        positions.push(position);
    }
    Ok(Atoms::new(labels, positions, coordinates)?)
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    pub fn new(arguments: ArgMatches) -> Result<Self> {
        let centering = single::<Centering>(&arguments, "centering")?;
        let lengths = triple::<f64>(&arguments, "lengths")?;
        let mut angles = triple::<f64>(&arguments, "angles")?;
        if arguments.is_present("degrees") {
            for a in angles.iter_mut() {
                *a = a.to_radians();
            }
        }
        let convention = single::<Convention>(&arguments, "convention")?;
        let grid = triple::<u32>(&arguments, "grid")?;
        if grid.iter().any(|n| *n == 0) {
            return Err(anyhow!("Grid divisions must be positive, found {:?}", grid));
        }
        let shift = triple::<f64>(&arguments, "shift")?;
        let atom_coordinates = if arguments.is_present("cartesian") {
            Coordinates::Cartesian
        } else {
            Coordinates::Lattice
        };
        let atoms = match arguments.values_of("atom") {
            Some(values) => parse_atoms(&values.collect::<Vec<&str>>(),
                                        atom_coordinates)?,
            None => Atoms::empty(),
        };
        let tolerance = Tolerance::new(single(&arguments, "rtol")?,
                                       single(&arguments, "atol")?,
                                       single(&arguments, "eps")?,
                                       single(&arguments, "decimals")?);
        let coordinates = if arguments.is_present("lattice coordinates") {
            Coordinates::Lattice
        } else {
            Coordinates::Cartesian
        };
        let output = single::<String>(&arguments, "output")?;
        let threads = match single::<usize>(&arguments, "threads")? {
            0 => num_cpus::get(),
            x => x,
        };
        let verbosity = match arguments.occurrences_of("verbose") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Ok(Self { centering,
                  lengths,
                  angles,
                  convention,
                  grid,
                  shift,
                  atoms,
                  tolerance,
                  bz: arguments.is_present("bz"),
                  coordinates,
                  output,
                  threads,
                  verbosity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 13] = ["bzr", "-c", "prim", "-l", "1", "1", "1",
                                  "-a", "1.5707963267948966",
                                  "1.5707963267948966",
                                  "1.5707963267948966", "-g", "4"];

    fn args(extra: &[&str]) -> Args {
        let mut argv = REQUIRED.to_vec();
        argv.extend_from_slice(&["4", "4"]);
        argv.extend_from_slice(extra);
        let app = ClapApp::App.get();
        Args::new(app.get_matches_from(argv)).unwrap()
    }

    #[test]
    fn clapapp_get() {
        let app = ClapApp::App.get();
        assert_eq!(app.get_name(), "Brillouin Zone Reduction")
    }

    #[test]
    fn argument_required() {
        let args = args(&[]);
        assert_eq!(args.centering, Centering::Primitive);
        assert_eq!(args.lengths, [1.; 3]);
        assert_eq!(args.grid, [4; 3]);
        assert_eq!(args.shift, [0.; 3]);
        assert!(args.atoms.is_empty())
    }

    #[test]
    #[should_panic]
    fn argument_no_grid() {
        let app = ClapApp::App.get();
        let _ = app.try_get_matches_from(&REQUIRED[..11])
                   .unwrap_or_else(|e| panic!("An error occurs: {}", e));
    }

    #[test]
    #[should_panic]
    fn argument_centering_not_centering() {
        let mut argv = REQUIRED.to_vec();
        argv[2] = "side";
        argv.extend_from_slice(&["4", "4"]);
        let app = ClapApp::App.get();
        let _ = app.try_get_matches_from(argv)
                   .unwrap_or_else(|e| panic!("An error occurs: {}", e));
    }

    #[test]
    fn argument_degrees() {
        let args = args(&["--degrees"]);
        assert!((args.angles[0] - 1.5707963267948966f64.to_radians()).abs() < 1e-12)
    }

    #[test]
    fn argument_shift_negative() {
        let args = args(&["-s", "-0.5", "0", "0.5"]);
        assert_eq!(args.shift, [-0.5, 0., 0.5])
    }

    #[test]
    fn argument_grid_zero() {
        let mut argv = REQUIRED.to_vec();
        argv[12] = "0";
        argv.extend_from_slice(&["4", "4"]);
        let app = ClapApp::App.get();
        assert!(Args::new(app.get_matches_from(argv)).is_err())
    }

    #[test]
    fn argument_atoms() {
        let args = args(&["--atom", "Si 0 0 0", "--atom", "Si 0.25 0.25 -0.25"]);
        assert_eq!(args.atoms.len(), 2);
        assert_eq!(args.atoms.labels[1], "Si");
        assert_eq!(args.atoms.positions[1], [0.25, 0.25, -0.25]);
        assert_eq!(args.atoms.coordinates, Coordinates::Lattice)
    }

    #[test]
    fn argument_atoms_cartesian() {
        let args = args(&["--atom", "Cs 0 0 0", "--cartesian"]);
        assert_eq!(args.atoms.coordinates, Coordinates::Cartesian)
    }

    #[test]
    fn argument_atom_malformed() {
        assert!(parse_atoms(&["Si 0 0"], Coordinates::Lattice).is_err());
        assert!(parse_atoms(&["Si 0 zero 0"], Coordinates::Lattice).is_err())
    }

    #[test]
    fn argument_tolerance_default() {
        let args = args(&[]);
        assert_eq!(args.tolerance, Tolerance::default())
    }

    #[test]
    fn argument_tolerance() {
        let args = args(&["--rtol", "1e-3", "--decimals", "6"]);
        assert_eq!(args.tolerance.rtol, 1e-3);
        assert_eq!(args.tolerance.decimals, 6)
    }

    #[test]
    fn argument_threads_default() {
        let args = args(&[]);
        assert_eq!(args.threads, num_cpus::get())
    }

    #[test]
    fn argument_threads() {
        let args = args(&["-J", "3"]);
        assert_eq!(args.threads, 3)
    }

    #[test]
    fn argument_output() {
        let args = args(&[]);
        assert_eq!(args.output, String::from("IRKPTS.dat"));
        assert_eq!(args.coordinates, Coordinates::Cartesian);
        assert!(!args.bz)
    }

    #[test]
    fn argument_flags() {
        let args = args(&["--bz", "--lattice-coords", "-o", "KPTS"]);
        assert!(args.bz);
        assert_eq!(args.coordinates, Coordinates::Lattice);
        assert_eq!(args.output, String::from("KPTS"))
    }

    #[test]
    fn argument_verbosity() {
        assert_eq!(args(&[]).verbosity, LevelFilter::Warn);
        assert_eq!(args(&["-vv"]).verbosity, LevelFilter::Debug)
    }

    #[test]
    fn argument_convention() {
        assert_eq!(args(&[]).convention, Convention::Ordinary);
        assert_eq!(args(&["--convention", "angular"]).convention,
                   Convention::Angular)
    }
}
