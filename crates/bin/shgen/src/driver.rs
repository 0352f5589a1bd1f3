use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};

use raven_asset::{DdsCubemap, sh_json};
use raven_filesystem::{FileSystem, standardize_path};
use raven_ibl::{ShCoefficients, ShKernel, project_with_kernel, reconstruct};
use raven_math::ColorAccess;

use crate::console::ConsoleVars;

pub const NO_INPUT_MESSAGE: &str = "No input source specified! Use --input <filename/folder>, or see --help";

/// Suffix of the preview cubemaps written in batch mode.
const PREVIEW_SUFFIX: &str = "_diffuse";

/// One cubemap to bake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preview: PathBuf,
}

impl Job {
    /// Outputs next to the input: `<stem>.json` and `<stem>_diffuse.dds`.
    fn beside(input: PathBuf) -> Self {
        let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

        Self {
            output: input.with_file_name(format!("{}.json", stem)),
            preview: input.with_file_name(format!("{}{}.dds", stem, PREVIEW_SUFFIX)),
            input,
        }
    }
}

pub struct Driver<'fs> {
    fs: &'fs dyn FileSystem,
}

impl<'fs> Driver<'fs> {
    pub fn new(fs: &'fs dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Turn the console input into jobs.
    ///
    /// A plain file is one job using the configured output paths. A directory
    /// (searched recursively for `*.dds`) or a wildcard pattern gives one job per
    /// match, skipping previews written by an earlier run.
    pub fn plan(&self, vars: &ConsoleVars) -> anyhow::Result<Vec<Job>> {
        let input = match &vars.input {
            Some(input) if !input.is_empty() => input,
            _ => bail!(NO_INPUT_MESSAGE),
        };

        let pattern = if input.contains('*') {
            standardize_path(input, false)
        } else if self.fs.is_dir(Path::new(input)) {
            format!("{}*.dds", standardize_path(input, true))
        } else {
            return Ok(vec![Job {
                input: PathBuf::from(input),
                output: vars.output.clone(),
                preview: vars.preview.clone(),
            }]);
        };

        let jobs: Vec<_> = self.fs.find_files(&pattern)?
            .into_iter()
            .filter(|file| {
                let is_preview = file.path.file_stem()
                    .map_or(false, |stem| stem.to_string_lossy().ends_with(PREVIEW_SUFFIX));
                if is_preview {
                    log::debug!("skip preview {}", file.path.display());
                }
                !is_preview
            })
            .map(|file| Job::beside(file.path))
            .collect();

        if jobs.is_empty() {
            bail!("No cubemap matches {}!", input);
        }

        log::info!("{} cubemap(s) match {}", jobs.len(), input);
        Ok(jobs)
    }

    /// Bake one cubemap: write the coefficients, then in verbose mode the
    /// reconstructed preview. Returns the coefficients.
    pub fn run_job(&self, job: &Job, kernel: ShKernel, verbose: bool) -> anyhow::Result<ShCoefficients> {
        let now = Instant::now();
        log::info!("Processing {}", job.input.display());

        let bytes = self.fs.read_bytes(&job.input)?;
        let mut dds = DdsCubemap::parse(&bytes)
            .with_context(|| format!("Failed to load cubemap {:?}", job.input))?;

        let sh = project_with_kernel(&dds.cubemap(), kernel);

        self.write(&job.output, sh_json::to_json_string(&sh).as_bytes())?;
        log::info!("Wrote {} coefficients to {}", kernel, job.output.display());

        if verbose {
            for (i, c) in sh.iter().enumerate() {
                log::info!("sh[{}] = ({:.6}, {:.6}, {:.6})", i, c.r(), c.g(), c.b());
            }

            reconstruct(&mut dds.cubemap_mut(), &sh);
            self.write(&job.preview, dds.as_bytes())?;
            log::info!("Wrote preview to {}", job.preview.display());
        }

        log::debug!("{} took {:.3} ms", job.input.display(), now.elapsed().as_secs_f64() * 1000.0);
        Ok(sh)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_directory(parent)?;
        }
        self.fs.write_bytes(path, bytes)
    }
}
