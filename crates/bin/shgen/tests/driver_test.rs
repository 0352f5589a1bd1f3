use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use raven_asset::{DdsCubemap, sh_json};
use raven_filesystem::{FileSystem, MemoryFileSystem};
use raven_ibl::{Face, ShKernel};
use raven_math::Vec3;
use shgen::{Driver, Job, NO_INPUT_MESSAGE, console};

fn uniform_dds(dim: usize, color: Vec3) -> Vec<u8> {
    let mut dds = DdsCubemap::new(dim);
    {
        let mut cubemap = dds.cubemap_mut();
        for face in Face::ALL {
            cubemap.face_mut(face).fill(color);
        }
    }
    dds.to_bytes()
}

fn vars(args: &[&str]) -> console::ConsoleVars {
    let mut all = vec!["shgen"];
    all.extend_from_slice(args);
    console::parse(all).unwrap().0
}

#[test]
fn missing_input_is_reported() {
    let fs = MemoryFileSystem::new();
    let driver = Driver::new(&fs);

    let err = driver.plan(&vars(&[])).unwrap_err();
    assert_eq!(err.to_string(), NO_INPUT_MESSAGE);
}

#[test]
fn single_file_uses_configured_outputs() {
    let fs = MemoryFileSystem::new();
    let driver = Driver::new(&fs);

    let jobs = driver.plan(&vars(&["-i", "sky.dds", "-o", "out/sky.json"])).unwrap();
    assert_eq!(jobs, vec![Job {
        input: PathBuf::from("sky.dds"),
        output: PathBuf::from("out/sky.json"),
        preview: PathBuf::from("diffuse.dds"),
    }]);
}

#[test]
fn directory_input_finds_cubemaps_recursively() {
    let fs = MemoryFileSystem::new();
    fs.insert("envs/noon.dds", uniform_dds(2, Vec3::ONE));
    fs.insert("envs/night/moon.dds", uniform_dds(2, Vec3::ONE));
    fs.insert("envs/noon_diffuse.dds", uniform_dds(2, Vec3::ONE));
    fs.insert("envs/readme.txt", vec![0u8]);
    let driver = Driver::new(&fs);

    let jobs = driver.plan(&vars(&["-i", "envs"])).unwrap();
    assert_eq!(jobs, vec![
        Job {
            input: PathBuf::from("envs/night/moon.dds"),
            output: PathBuf::from("envs/night/moon.json"),
            preview: PathBuf::from("envs/night/moon_diffuse.dds"),
        },
        Job {
            input: PathBuf::from("envs/noon.dds"),
            output: PathBuf::from("envs/noon.json"),
            preview: PathBuf::from("envs/noon_diffuse.dds"),
        },
    ]);

    let jobs = driver.plan(&vars(&["-i", "envs\\night\\*.dds"])).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].input, PathBuf::from("envs/night/moon.dds"));

    assert!(driver.plan(&vars(&["-i", "envs/*.hdr"])).is_err());
}

#[test]
fn bakes_prescaled_coefficients_and_preview() {
    let color = Vec3::new(0.5, 1.0, 2.0);
    let fs = MemoryFileSystem::new();
    fs.insert("sky.dds", uniform_dds(8, color));
    let driver = Driver::new(&fs);

    let jobs = driver.plan(&vars(&["-i", "sky.dds", "-o", "out/sky.json", "-p", "out/sky_diffuse.dds"])).unwrap();
    let sh = driver.run_job(&jobs[0], ShKernel::PreScaledIrradiance, true).unwrap();

    assert!((sh[0] - color.as_dvec3()).abs().max_element() < 1e-5);

    let json = fs.read_bytes(Path::new("out/sky.json")).unwrap();
    let written = sh_json::from_json_str(std::str::from_utf8(&json).unwrap()).unwrap();
    for i in 0..9 {
        assert!((written[i] - sh[i]).abs().max_element() < 1e-12);
    }

    let preview = fs.read_bytes(Path::new("out/sky_diffuse.dds")).unwrap();
    let preview = DdsCubemap::parse(&preview).unwrap();
    let cubemap = preview.cubemap();
    for face in Face::ALL {
        let texel = cubemap.face(face).texel(3, 5);
        assert!((texel - color).abs().max_element() < 1e-4, "{} {:?}", face, texel);
    }
}

#[test]
fn irradiance_kernel_scales_by_pi() {
    let fs = MemoryFileSystem::new();
    fs.insert("sky.dds", uniform_dds(4, Vec3::ONE));
    let driver = Driver::new(&fs);

    let job = Job {
        input: PathBuf::from("sky.dds"),
        output: PathBuf::from("sky.json"),
        preview: PathBuf::from("sky_diffuse.dds"),
    };
    let sh = driver.run_job(&job, ShKernel::Irradiance, false).unwrap();

    assert!((sh[0].x - PI).abs() < 1e-6);
    assert!(fs.exists(Path::new("sky.json")));
    // no preview unless verbose
    assert!(!fs.exists(Path::new("sky_diffuse.dds")));
}

#[test]
fn broken_input_names_the_file() {
    let fs = MemoryFileSystem::new();
    fs.insert("broken.dds", b"DDS not really".to_vec());
    let driver = Driver::new(&fs);

    let job = Job {
        input: PathBuf::from("broken.dds"),
        output: PathBuf::from("broken.json"),
        preview: PathBuf::from("broken_diffuse.dds"),
    };
    let err = driver.run_job(&job, ShKernel::PreScaledIrradiance, false).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.dds"));
    assert!(!fs.exists(Path::new("broken.json")));

    let missing = Job { input: PathBuf::from("missing.dds"), ..job };
    assert!(driver.run_job(&missing, ShKernel::PreScaledIrradiance, false).is_err());
}
