//! QR code commands

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::QrApi;
use crate::client::models::{QrImage, QrUpload};
use crate::error::{Error, Result};
use crate::output::json::print_json;
use crate::output::table::format_details;

/// Show whether a QR code is stored
pub async fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stored = ctx.progress.spin("Fetching QR code...", ctx.client.get_qr()).await?;

    let details = match &stored {
        None => None,
        Some(qr) => Some(describe(&qr.image()?)),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "configured": stored.is_some(),
            "image": details.as_ref().map(|(kind, location)| json!({"kind": kind, "location": location})),
        }))?,
        OutputFormat::Table => match details {
            None => println!("No QR code configured. Upload one with 'actctl qr upload <file>'."),
            Some((kind, location)) => println!(
                "{}",
                format_details(&[("Stored", "yes".to_string()), ("Kind", kind), ("Location", location)])
            ),
        },
    }
    Ok(())
}

fn describe(image: &QrImage) -> (String, String) {
    match image {
        QrImage::Inline { mime, bytes } => (
            "inline".to_string(),
            format!("{} ({} bytes)", mime, bytes.len()),
        ),
        QrImage::Remote(url) => ("remote".to_string(), url.clone()),
    }
}

/// Upload an image, replacing the stored one
pub async fn upload(opts: &GlobalOptions, file: &Path) -> Result<()> {
    // Validate before touching the network
    let upload = QrUpload::from_path(file)?;
    let ctx = CommandContext::new(opts)?;

    let size = upload.bytes.len();
    ctx.progress.spin("Uploading QR code...", ctx.client.upload_qr(upload)).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({"uploaded": true, "file": file, "bytes": size}))?,
        OutputFormat::Table => eprintln!("{} QR code uploaded successfully", "✓".green()),
    }
    Ok(())
}

/// Save the stored image to disk
pub async fn download(opts: &GlobalOptions, output: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let Some(stored) = ctx.progress.spin("Fetching QR code...", ctx.client.get_qr()).await? else {
        return Err(Error::Other("No QR code configured".to_string()));
    };

    let path = match output {
        Some(p) => p.to_path_buf(),
        None => default_file_name(&stored.image()?),
    };
    write_image(&ctx, &stored.qr_code, &path).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({"file": path}))?,
        OutputFormat::Table => eprintln!("{} QR code saved to {}", "✓".green(), path.display()),
    }
    Ok(())
}

/// Delete the stored QR code
pub async fn delete(opts: &GlobalOptions, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        eprintln!("{} Delete the stored QR code? This cannot be undone.", "⚠".yellow());
        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.progress.spin("Deleting QR code...", ctx.client.delete_qr()).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({"deleted": true}))?,
        OutputFormat::Table => eprintln!("{} QR code deleted successfully", "✓".green()),
    }
    Ok(())
}

/// Decode or download `source` and write the bytes to `path`
pub async fn write_image(ctx: &CommandContext, source: &str, path: &Path) -> Result<()> {
    let bytes = match QrImage::from_source(source)? {
        QrImage::Inline { bytes, .. } => bytes,
        QrImage::Remote(url) => {
            ctx.progress.spin("Downloading image...", ctx.client.fetch_bytes(&url)).await?
        }
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

/// `qr.png` or `qr.jpg` depending on what the image is
fn default_file_name(image: &QrImage) -> PathBuf {
    let ext = match image {
        QrImage::Inline { mime, .. } if mime == "image/jpeg" => "jpg",
        QrImage::Remote(url) if url.to_ascii_lowercase().ends_with(".jpg") => "jpg",
        QrImage::Remote(url) if url.to_ascii_lowercase().ends_with(".jpeg") => "jpg",
        _ => "png",
    };
    PathBuf::from(format!("qr.{}", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let png = QrImage::Inline {
            mime: "image/png".to_string(),
            bytes: vec![],
        };
        assert_eq!(default_file_name(&png), PathBuf::from("qr.png"));

        let jpeg = QrImage::Inline {
            mime: "image/jpeg".to_string(),
            bytes: vec![],
        };
        assert_eq!(default_file_name(&jpeg), PathBuf::from("qr.jpg"));

        let remote = QrImage::Remote("https://cdn.example.com/Q.JPEG".to_string());
        assert_eq!(default_file_name(&remote), PathBuf::from("qr.jpg"));
    }

    #[test]
    fn test_describe() {
        let (kind, location) = describe(&QrImage::Inline {
            mime: "image/png".to_string(),
            bytes: vec![0; 3],
        });
        assert_eq!(kind, "inline");
        assert_eq!(location, "image/png (3 bytes)");

        let (kind, _) = describe(&QrImage::Remote("https://cdn/qr.png".to_string()));
        assert_eq!(kind, "remote");
    }
}
