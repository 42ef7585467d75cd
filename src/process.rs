use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use compress_io::compress;
use serde::Serialize;

use mqmap_utils::{
    metadata::{collect_starting_metadata, Metadata},
    read_mq_map,
    scratch::{create_scratch_dir_in, remove_scratch_dir},
    tabout, MappabilityMask, MaskSummary,
};

use crate::cli::config::Config;

#[derive(Serialize)]
struct Output<'a> {
    metadata: Metadata,
    chromosome: &'a str,
    summary: MaskSummary,
}

struct OutputNames {
    regions: String,
    json: String,
}

impl OutputNames {
    fn new(cfg: &Config) -> Self {
        let mut regions = format!("{}_regions.txt", cfg.prefix());
        if let Some(sfx) = cfg.compress().suffix() {
            regions.push('.');
            regions.push_str(sfx);
        }
        Self {
            regions,
            json: format!("{}.json", cfg.prefix()),
        }
    }
}

pub fn process(cfg: Config) -> anyhow::Result<()> {
    let dir = cfg.dir().unwrap_or_else(|| Path::new("."));
    let stdout = io::stdout();
    run(&cfg, dir, &mut stdout.lock())
}

/// Build the mask, place the output files in `dir` and write the summary
/// line to `out`
fn run<W: Write>(cfg: &Config, dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let clock = cfg.clock();
    let mut metadata = Metadata::new();
    collect_starting_metadata(&mut metadata);

    clock.update(format!(
        "Reading mappability for {} ({} bp) from {}",
        cfg.chromosome(),
        cfg.length(),
        cfg.mappability().display()
    ));
    let mask = read_mq_map(cfg.mappability(), cfg.chromosome(), cfg.length())
        .with_context(|| format!("Error building mappability mask for {}", cfg.chromosome()))?;
    let summary = mask.summary();
    clock.update(format!(
        "Mappability mask built: {} of {} bases mappable in {} regions",
        summary.mappable, summary.length, summary.n_regions
    ));

    metadata.insert(
        "mappability_file",
        cfg.mappability().to_string_lossy().to_string(),
    );

    // Create output dir if necessary
    fs::create_dir_all(dir).with_context(|| "Could not create output directory")?;
    metadata.insert("output_dir", dir.to_string_lossy().to_string());

    // Outputs are written to a scratch directory and moved into place once complete
    let scratch = create_scratch_dir_in(dir)?;
    let names = OutputNames::new(cfg);
    if let Err(e) = write_outputs(cfg, &mask, summary, metadata, &scratch, &names)
        .and_then(|_| move_outputs(&scratch, dir, &names))
    {
        if let Err(err) = fs::remove_dir_all(&scratch) {
            warn!("Could not clean up {}: {}", scratch.display(), err)
        }
        return Err(e);
    }
    remove_scratch_dir(&scratch);

    writeln!(
        out,
        "{}",
        tabout!(
            cfg.chromosome(),
            summary.length,
            summary.mappable,
            summary.n_regions,
            summary.fraction
        )
    )?;
    clock.update("Finished");
    Ok(())
}

fn write_outputs(
    cfg: &Config,
    mask: &MappabilityMask,
    summary: MaskSummary,
    mut metadata: Metadata,
    scratch: &Path,
    names: &OutputNames,
) -> anyhow::Result<()> {
    let regions_path = scratch.join(&names.regions);
    write_regions(cfg, mask, &regions_path)
        .with_context(|| format!("Could not write regions file {}", names.regions))?;
    metadata.insert("regions_output_name", names.regions.clone());
    metadata.insert("json_output_name", names.json.clone());
    metadata.insert("elapsed_time", cfg.clock().elapsed_str());

    let out = Output {
        metadata,
        chromosome: cfg.chromosome(),
        summary,
    };

    let json_path = scratch.join(&names.json);
    let mut wrt = fs::File::create(&json_path)
        .with_context(|| format!("Could not open output file {}", json_path.display()))?;
    serde_json::to_writer_pretty(&mut wrt, &out).with_context(|| "Could not write out JSON file")
}

fn write_regions(cfg: &Config, mask: &MappabilityMask, path: &Path) -> anyhow::Result<()> {
    debug!("Writing mappable regions to {}", path.display());
    let mut wrt = match cfg.compress().compress_type() {
        Some(ct) => compress::CompressIo::new().path(path).ctype(ct).bufwriter(),
        None => compress::CompressIo::new().path(path).bufwriter(),
    }?;
    for [start, stop] in mask.regions() {
        writeln!(wrt, "{}", tabout!(cfg.chromosome(), start, stop))?;
    }
    wrt.flush()?;
    Ok(())
}

fn move_outputs(scratch: &Path, dir: &Path, names: &OutputNames) -> anyhow::Result<()> {
    for name in [&names.regions, &names.json] {
        let from = scratch.join(name);
        let to: PathBuf = dir.join(name);
        fs::rename(&from, &to)
            .with_context(|| format!("Could not move {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}
