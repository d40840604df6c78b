extern crate clap;
extern crate env_logger;
extern crate mathart;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mathart::{
    generate, Colormap, ComplexRegion, FractalError, ImageRenderer, Kind, Primality, Renderer,
    Request,
};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

/// Four comma-separated numbers: x_min,x_max,y_min,y_max.
fn parse_region(s: &str) -> Option<ComplexRegion> {
    let bounds: Vec<f64> = s
        .split(',')
        .map(|b| f64::from_str(b.trim()))
        .collect::<Result<_, _>>()
        .ok()?;
    match bounds.as_slice() {
        [x_min, x_max, y_min, y_max] => ComplexRegion::new(*x_min, *x_max, *y_min, *y_max).ok(),
        _ => None,
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_with<T>(parsed: Option<T>, err: &str) -> Result<(), String> {
    match parsed {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

const KIND: &str = "type";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "iterations";
const REGION: &str = "region";
const JULIA: &str = "julia";
const DEPTH: &str = "depth";
const SIZE: &str = "size";
const COUNT: &str = "count";
const LIMIT: &str = "limit";
const LEGACY: &str = "legacy-primes";
const THREADS: &str = "threads";
const CMAP: &str = "cmap";
const OUTPUT: &str = "output";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mathart")
        .version("0.1.0")
        .about("Renders fractals, carpets and prime spirals")
        .arg(
            Arg::with_name(KIND)
                .long(KIND)
                .short("t")
                .takes_value(true)
                .default_value("mandelbrot")
                .possible_values(&[
                    "mandelbrot",
                    "julia",
                    "newton",
                    "sierpinski",
                    "ulam",
                    "prime-scatter",
                    "primes",
                ])
                .help("Type of picture to generate"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("800")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        20_000,
                        "Could not parse width",
                        "Width must be between 1 and 20000",
                    )
                })
                .help("Image width in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("800")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        20_000,
                        "Could not parse height",
                        "Height must be between 1 and 20000",
                    )
                })
                .help("Image height in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 0 and 1000000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(REGION)
                .long(REGION)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_with(
                        parse_region(&s),
                        "Region must be x_min,x_max,y_min,y_max with min < max",
                    )
                })
                .help("Region of the complex plane: x_min,x_max,y_min,y_max"),
        )
        .arg(
            Arg::with_name(JULIA)
                .long(JULIA)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.7,0.27")
                .validator(|s| validate_with(parse_complex(&s), "Could not parse julia constant"))
                .help("Julia constant as re,im"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        64,
                        "Could not parse depth",
                        "Depth must be between 0 and 64",
                    )
                })
                .help("Deepest level of the carpet to cut (default: all)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .conflicts_with(COUNT)
                .validator(|s| validate_with(usize::from_str(&s).ok(), "Could not parse grid size"))
                .help("Side of the Ulam grid (odd)"),
        )
        .arg(
            Arg::with_name(COUNT)
                .long(COUNT)
                .short("n")
                .takes_value(true)
                .validator(|s| validate_with(u64::from_str(&s).ok(), "Could not parse count"))
                .help("How many integers the Ulam grid must hold"),
        )
        .arg(
            Arg::with_name(LIMIT)
                .long(LIMIT)
                .short("l")
                .takes_value(true)
                .default_value("10000")
                .validator(|s| validate_with(u64::from_str(&s).ok(), "Could not parse limit"))
                .help("Largest integer on the prime scatter"),
        )
        .arg(
            Arg::with_name(LEGACY)
                .long(LEGACY)
                .help("Use the historical primality rule, defects included"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("j")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the sampler"),
        )
        .arg(
            Arg::with_name(CMAP)
                .long(CMAP)
                .takes_value(true)
                .default_value("magma")
                .possible_values(Colormap::NAMES)
                .help("Colormap"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("fractal.png")
                .help("Output file"),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, FractalError> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(s) => T::from_str(s)
            .map(Some)
            .map_err(|_| FractalError::InvalidArgument(format!("could not parse --{}", name))),
    }
}

fn required<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, FractalError> {
    value(matches, name)?
        .ok_or_else(|| FractalError::InvalidArgument(format!("--{} is required", name)))
}

fn request(matches: &ArgMatches) -> Result<Request, FractalError> {
    let kind: Kind = required(matches, KIND)?;
    let mut request = Request::new(kind);
    request.width = required(matches, WIDTH)?;
    request.height = required(matches, HEIGHT)?;
    request.max_iter = required(matches, ITERATIONS)?;
    request.region = match matches.value_of(REGION) {
        Some(s) => Some(parse_region(s).ok_or_else(|| {
            FractalError::InvalidArgument("could not parse --region".to_string())
        })?),
        None => None,
    };
    if let Some(s) = matches.value_of(JULIA) {
        request.julia_c = parse_complex(s)
            .ok_or_else(|| FractalError::InvalidArgument("could not parse --julia".to_string()))?;
    }
    request.carpet_depth = value(matches, DEPTH)?;
    request.ulam_size = value(matches, SIZE)?;
    request.ulam_count = value(matches, COUNT)?;
    request.scatter_limit = required(matches, LIMIT)?;
    if matches.is_present(LEGACY) {
        request.primality = Primality::Legacy;
    }
    request.threads = required(matches, THREADS)?;
    Ok(request)
}

fn run(matches: &ArgMatches) -> Result<String, FractalError> {
    let request = request(matches)?;
    let colormap: Colormap = required(matches, CMAP)?;
    let output: String = required(matches, OUTPUT)?;

    let artwork = generate(&request)?;
    let renderer = ImageRenderer {
        canvas: (request.width as u32, request.height as u32),
    };
    renderer.emit(&artwork, colormap, Path::new(&output))?;
    Ok(output)
}

fn main() {
    env_logger::init();
    let matches = args();

    match run(&matches) {
        Ok(output) => println!("Fractal saved to {}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
