//! Entry point for the glus geometry demo.
//! Generates a primitive or loads an OBJ model and logs what it got.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use asset::{Mesh, ObjConfig, ObjLoader, Shape, Topology};

struct Options {
    shape: String,
    slices: u32,
    stacks: u32,
    size: f32,
    strip: bool,
    tangents: bool,
    obj: Option<PathBuf>,
    max_vertices: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shape: "sphere".into(),
            slices: 32,
            stacks: 8,
            size: 1.0,
            strip: false,
            tangents: false,
            obj: None,
            max_vertices: None,
        }
    }
}

fn parse_value<T>(flag: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid {flag} '{value}'"))
}

fn parse_args() -> Result<Options> {
    // Accept: --shape= --slices= --stacks= --size= --strip --tangents --obj= --max-vertices=
    let mut opts = Options::default();
    for arg in std::env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("--shape=") {
            opts.shape = v.to_ascii_lowercase();
        } else if let Some(v) = arg.strip_prefix("--slices=") {
            opts.slices = parse_value("--slices", v)?;
        } else if let Some(v) = arg.strip_prefix("--stacks=") {
            opts.stacks = parse_value("--stacks", v)?;
        } else if let Some(v) = arg.strip_prefix("--size=") {
            opts.size = parse_value("--size", v)?;
        } else if let Some(v) = arg.strip_prefix("--obj=") {
            opts.obj = Some(PathBuf::from(v));
        } else if let Some(v) = arg.strip_prefix("--max-vertices=") {
            opts.max_vertices = Some(parse_value("--max-vertices", v)?);
        } else if arg == "--strip" {
            opts.strip = true;
        } else if arg == "--tangents" {
            opts.tangents = true;
        } else {
            log::warn!("Ignoring unknown argument '{}'", arg);
        }
    }
    Ok(opts)
}

fn shape_from(opts: &Options) -> Result<Shape> {
    let (size, slices, stacks) = (opts.size, opts.slices, opts.stacks);
    let shape = match opts.shape.as_str() {
        "plane" => Shape::Plane { half_extent: size },
        "rect" => Shape::RectangularPlane {
            half_width: size,
            half_height: size * 0.5,
        },
        "grid" => Shape::GridPlane {
            half_width: size,
            half_height: size,
            rows: stacks,
            columns: slices,
            topology: if opts.strip {
                Topology::TriangleStrip
            } else {
                Topology::TriangleList
            },
        },
        "disc" => Shape::Disc {
            radius: size,
            slices,
        },
        "cube" => Shape::Cube { half_extent: size },
        "sphere" => Shape::Sphere {
            radius: size,
            slices,
        },
        "dome" => Shape::Dome {
            radius: size,
            slices,
        },
        "torus" => Shape::Torus {
            inner_radius: size * 0.5,
            outer_radius: size,
            slices,
            stacks,
        },
        "cylinder" => Shape::Cylinder {
            half_extent: size,
            radius: size * 0.5,
            slices,
        },
        "cone" => Shape::Cone {
            half_extent: size,
            radius: size * 0.5,
            slices,
            stacks,
        },
        other => bail!("Unknown shape '{other}'"),
    };
    Ok(shape)
}

fn log_mesh(label: &str, mesh: &Mesh) {
    log::info!(
        "{}: {} vertices, {} indices ({:?}), {} triangles, normals={}, texcoords={}, tangents={}",
        label,
        mesh.vertex_count(),
        mesh.index_count(),
        mesh.topology,
        mesh.triangle_count(),
        mesh.has_normals(),
        mesh.has_tex_coords(),
        mesh.has_tangents()
    );
    if let Some(c) = mesh.centroid() {
        log::debug!("{} centroid: {:?}", label, c);
    }
}

fn run_obj(path: &Path, opts: &Options) -> Result<()> {
    let mut config = ObjConfig::default();
    if let Some(max) = opts.max_vertices {
        config = config
            .with_max_vertices(max)
            .with_max_triangle_vertices(max);
    }
    let mut model = ObjLoader::new()
        .with_config(config)
        .load_model_from_path(path)
        .with_context(|| format!("Failed to load model {path:?}"))?;

    if opts.tangents && model.mesh.has_normals() && model.mesh.has_tex_coords() {
        model.mesh = model.mesh.with_tangents()?;
    }
    log_mesh(&path.display().to_string(), &model.mesh);

    let base_dir = path.parent().unwrap_or(Path::new("."));
    for group in &model.groups {
        let material = model.material(group);
        log::info!(
            "  group '{}': indices {:?}, material {:?}",
            group.name,
            group.index_range(),
            material.map(|m| m.name.as_str())
        );
        if let Some(material) = material {
            match material.load_diffuse_texture(base_dir) {
                Ok(texture) => log::info!(
                    "    diffuse texture {}x{}",
                    texture.width,
                    texture.height
                ),
                Err(e) => log::warn!("    {:#}", e),
            }
        }
    }
    for warning in &model.warnings {
        log::warn!("{}", warning);
    }
    Ok(())
}

fn run_shape(opts: &Options) -> Result<()> {
    let shape = shape_from(opts)?;
    let mut mesh = shape
        .generate()
        .with_context(|| format!("Failed to generate {}", shape.name()))?;
    if opts.tangents {
        mesh = mesh.with_tangents()?;
    }
    let (vertices, indices) = shape.expected_counts()?;
    log::debug!("Expected {} vertices, {} indices", vertices, indices);
    log_mesh(shape.name(), &mesh);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args()?;
    match &opts.obj {
        Some(path) => run_obj(path, &opts)?,
        None => run_shape(&opts)?,
    }
    Ok(())
}
