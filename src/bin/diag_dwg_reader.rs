/// Diagnostic tool: reads DWG files and reports what the reader finds.
///
/// Usage:
///     cargo run --bin diag_dwg_reader -- <path_to_dwg>
///     cargo run --bin diag_dwg_reader -- drawings/  (reads all .dwg in dir)

use acadbits::io::dwg::{DwgReader, DwgReaderConfiguration};
use acadbits::{DwgDocument, ObjectKind};
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: diag_dwg_reader <path_to_dwg_or_directory>");
    }

    let path = PathBuf::from(&args[1]);
    let mut files = Vec::new();

    if path.is_dir() {
        for entry in fs::read_dir(&path).with_context(|| format!("reading {}", path.display()))? {
            let p = entry?.path();
            if p.extension().map(|e| e.eq_ignore_ascii_case("dwg")).unwrap_or(false) {
                files.push(p);
            }
        }
        files.sort();
    } else {
        files.push(path);
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          acadbits DWG Reader Diagnostic                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut success = 0;
    let mut failed = 0;

    for file in &files {
        match diagnose_dwg(file) {
            Ok(()) => success += 1,
            Err(e) => {
                println!("  FAILED: {e:#}");
                failed += 1;
            }
        }
    }

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("Results: {} succeeded, {} failed out of {} total", success, failed, files.len());
    Ok(())
}

fn diagnose_dwg(path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    println!("{:<45} {:>8} bytes", filename, size);

    let doc = DwgReader::from_file(path)
        .and_then(|r| r.with_config(DwgReaderConfiguration::default()).read())
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.status(), e))?;

    print_summary(&doc);
    Ok(())
}

fn print_summary(doc: &DwgDocument) {
    let fh = &doc.file_header;
    println!(
        "  version {} (maint {}), code page {}, {} locators",
        doc.version,
        fh.maintenance_version,
        fh.drawing_code_page,
        fh.records.len()
    );
    for rec in &fh.records {
        println!("    #{:<2} {:#010X} +{:#X}", rec.number, rec.seeker, rec.size);
    }

    println!("  header: {} variables", doc.header.len());
    if let Some(seed) = doc.header.handle_seed() {
        println!("    HANDSEED {}", seed);
    }

    println!("  classes: {}", doc.classes.len());
    for class in doc.classes.iter() {
        println!("    {:>4} {:<28} {}", class.class_number, class.dxf_name, class.cpp_class_name);
    }

    let builtin = doc
        .objects
        .iter()
        .filter(|o| matches!(o.kind, ObjectKind::BuiltIn(_)))
        .count();
    println!(
        "  object map: {} entries, {} classified ({} built-in, {} class)",
        doc.object_map.len(),
        doc.objects.len(),
        builtin,
        doc.class_object_count()
    );

    if let Some(fs) = &doc.free_space {
        println!("  free space: ~{} objects, updated {}", fs.object_count, fs.update_date);
    }
    if let Some(t) = &doc.template {
        println!("  template: {:?} ({})", t.description, t.measurement);
    }
    if let Some(sh) = &doc.second_header {
        println!(
            "  second header at {:#X}: {} locators, {} handle records",
            sh.offset,
            sh.records.len(),
            sh.handles.len()
        );
    }
    if let Some(p) = &doc.preview {
        for image in &p.images {
            println!("  preview: {:?} {} bytes at {:#X}", image.kind, image.data.len(), image.start);
        }
    }
    for n in &doc.notifications {
        println!("  {n}");
    }
}
