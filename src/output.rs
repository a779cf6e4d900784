//! Output actions – print a document or download it as a file.
//!
//! Both actions talk to a host through a small trait so the same logic runs
//! against a browser bridge, the native hosts below, or a test double.
//!
//! - [`print_document`] opens a fresh surface, writes the document into it and
//!   prints. If no surface can be opened the call does nothing: there is no
//!   error value and nothing for the caller to handle.
//! - [`download_as_file`] wraps the document in a blob, mints a temporary
//!   object URL, clicks a hidden anchor exactly once and revokes the URL. The
//!   revoke runs from a drop guard, so it happens even if the click unwinds.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};

use crate::error::{ForgeError, Result};
use crate::model::RenderedDocument;

/// MIME type of every downloaded document.
pub const HTML_MIME: &str = "text/html;charset=utf-8";

// ---------------------------------------------------------------------------
// Print
// ---------------------------------------------------------------------------

/// A browsing surface a document can be written into and printed from.
pub trait PrintSurface {
    fn write(&mut self, html: &str);
    fn close(&mut self);
    fn focus(&mut self);
    fn print(&mut self);
}

/// Something that can open print surfaces (a browser, a print spooler…).
pub trait PrintHost {
    type Surface: PrintSurface;

    /// Open a new surface, or `None` if the host refuses (e.g. blocked).
    fn open(&mut self) -> Option<Self::Surface>;
}

/// Write `doc` into a new surface and print it. Silently does nothing when the
/// host cannot open a surface.
pub fn print_document<H: PrintHost>(host: &mut H, doc: &RenderedDocument) {
    let Some(mut surface) = host.open() else {
        log::debug!("print surface unavailable; skipping '{}'", doc.title);
        return;
    };

    surface.write(&doc.html);
    surface.close();
    surface.focus();
    surface.print();
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// In-memory file contents awaiting download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// The invisible link that is clicked to trigger a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub download: String,
    pub hidden: bool,
}

pub trait DownloadHost {
    /// Register `blob` and return a temporary URL that refers to it.
    fn create_object_url(&mut self, blob: Blob) -> String;

    /// Follow `anchor`, saving its target under `anchor.download`.
    fn click(&mut self, anchor: &Anchor) -> Result<()>;

    /// Release a URL returned by [`DownloadHost::create_object_url`].
    fn revoke_object_url(&mut self, url: &str);
}

/// Revokes its object URL when dropped.
struct ObjectUrl<'h, H: DownloadHost> {
    host: &'h mut H,
    url: String,
}

impl<H: DownloadHost> Drop for ObjectUrl<'_, H> {
    fn drop(&mut self) {
        self.host.revoke_object_url(&self.url);
    }
}

/// Save `doc.html` under `filename` through `host`.
///
/// Exactly one click and exactly one revoke happen per call.
pub fn download_as_file<H: DownloadHost>(
    host: &mut H,
    doc: &RenderedDocument,
    filename: &str,
) -> Result<()> {
    let blob = Blob {
        bytes: doc.html.as_bytes().to_vec(),
        mime: HTML_MIME.to_string(),
    };
    let url = host.create_object_url(blob);
    let guard = ObjectUrl { host, url };

    let anchor = Anchor {
        href: guard.url.clone(),
        download: filename.to_string(),
        hidden: true,
    };
    let result = guard.host.click(&anchor);
    drop(guard);

    if result.is_ok() {
        log::debug!("downloaded '{}' as {filename}", doc.title);
    }
    result
}

// ---------------------------------------------------------------------------
// Native hosts
// ---------------------------------------------------------------------------

/// Saves downloads into a directory.
///
/// Object URLs are `data:` URIs carrying the base64-encoded blob; a click
/// decodes the URI it was given and writes the bytes to `dir/filename`.
#[derive(Debug)]
pub struct DirectoryDownloads {
    dir: PathBuf,
    /// Live URLs and how many times each was minted.
    live: HashMap<String, usize>,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            live: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of object URLs created but not yet revoked.
    pub fn live_urls(&self) -> usize {
        self.live.values().sum()
    }
}

/// Reduce a requested filename to a single path component.
fn safe_filename(requested: &str) -> Result<&str> {
    let name = Path::new(requested)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ForgeError::InvalidFilename(requested.to_string()))?;
    if name != requested {
        return Err(ForgeError::InvalidFilename(requested.to_string()));
    }
    Ok(name)
}

fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    BASE64_STD.decode(payload).ok()
}

impl DownloadHost for DirectoryDownloads {
    fn create_object_url(&mut self, blob: Blob) -> String {
        let url = format!("data:{};base64,{}", blob.mime, BASE64_STD.encode(&blob.bytes));
        *self.live.entry(url.clone()).or_insert(0) += 1;
        url
    }

    fn click(&mut self, anchor: &Anchor) -> Result<()> {
        if !self.live.contains_key(&anchor.href) {
            return Err(ForgeError::UnknownObjectUrl);
        }
        let bytes = decode_data_uri(&anchor.href).ok_or(ForgeError::UnknownObjectUrl)?;
        let name = safe_filename(&anchor.download)?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &bytes)?;
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn revoke_object_url(&mut self, url: &str) {
        if let Some(count) = self.live.get_mut(url) {
            *count -= 1;
            if *count == 0 {
                self.live.remove(url);
            }
        }
    }
}

static SPOOL_SEQ: AtomicU64 = AtomicU64::new(0);

/// How long a spool file is kept before `open` sweeps it away.
pub const SPOOL_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Prints by opening the document in the system browser.
///
/// Each surface is a spool file; printing writes it with an auto-print hook
/// and hands it to the default browser. Without a browser, `open` returns
/// `None` and printing is skipped.
///
/// The browser loads the spool file after `print` returns, so files are not
/// removed straight away. Every `open` deletes spool files older than the
/// retention period (one hour by default).
#[derive(Debug, Clone)]
pub struct BrowserPrintHost {
    spool_dir: PathBuf,
    retention: Duration,
}

impl BrowserPrintHost {
    pub fn new(spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            spool_dir: spool_dir.into(),
            retention: SPOOL_RETENTION,
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }
}

fn is_spool_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("print-") && n.ends_with(".html"))
}

/// Delete spool files in `dir` last modified at least `retention` ago.
/// Returns how many were removed.
pub fn sweep_spool(dir: &Path, retention: Duration) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("cannot read spool directory {}: {e}", dir.display());
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_spool_file(&path) {
            continue;
        }
        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age >= retention);
        if !expired {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => log::warn!("cannot remove spool file {}: {e}", path.display()),
        }
    }
    if removed > 0 {
        log::debug!("swept {removed} spool file(s) from {}", dir.display());
    }
    removed
}

impl Default for BrowserPrintHost {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("docforge-print"))
    }
}

impl PrintHost for BrowserPrintHost {
    type Surface = SpoolSurface;

    fn open(&mut self) -> Option<SpoolSurface> {
        if !webbrowser::Browser::is_available() {
            log::warn!("no browser available to print with");
            return None;
        }
        if let Err(e) = fs::create_dir_all(&self.spool_dir) {
            log::warn!("cannot create spool directory {}: {e}", self.spool_dir.display());
            return None;
        }
        sweep_spool(&self.spool_dir, self.retention);

        let seq = SPOOL_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = self
            .spool_dir
            .join(format!("print-{}-{seq}.html", std::process::id()));
        Some(SpoolSurface {
            path,
            buffer: String::new(),
            closed: false,
        })
    }
}

/// Script appended before `</body>` so the browser opens its print dialog.
const AUTO_PRINT: &str = "<script>window.addEventListener('load', function () { window.print(); });</script>";

/// A print surface backed by a spool file.
#[derive(Debug)]
pub struct SpoolSurface {
    path: PathBuf,
    buffer: String,
    closed: bool,
}

impl SpoolSurface {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn printable_html(&self) -> String {
        match self.buffer.rfind("</body>") {
            Some(i) => format!("{}{AUTO_PRINT}\n{}", &self.buffer[..i], &self.buffer[i..]),
            None => format!("{}{AUTO_PRINT}", self.buffer),
        }
    }
}

impl PrintSurface for SpoolSurface {
    fn write(&mut self, html: &str) {
        if !self.closed {
            self.buffer.push_str(html);
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn focus(&mut self) {}

    fn print(&mut self) {
        if let Err(e) = fs::write(&self.path, self.printable_html()) {
            log::warn!("cannot write spool file {}: {e}", self.path.display());
            return;
        }
        let target = self.path.to_string_lossy();
        if let Err(e) = webbrowser::open(&target) {
            log::warn!("cannot open {target} for printing: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn doc() -> RenderedDocument {
        RenderedDocument {
            title: "Invoice INV-0042".into(),
            html: "<!DOCTYPE html><html><body><p>hi</p></body></html>".into(),
            styles: String::new(),
        }
    }

    // -- print ---------------------------------------------------------------

    #[derive(Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    struct RecordingSurface(Rc<RefCell<Vec<String>>>);

    impl PrintSurface for RecordingSurface {
        fn write(&mut self, html: &str) {
            self.0.borrow_mut().push(format!("write:{}", html.len()));
        }
        fn close(&mut self) {
            self.0.borrow_mut().push("close".into());
        }
        fn focus(&mut self) {
            self.0.borrow_mut().push("focus".into());
        }
        fn print(&mut self) {
            self.0.borrow_mut().push("print".into());
        }
    }

    struct RecordingHost {
        available: bool,
        log: Log,
    }

    impl PrintHost for RecordingHost {
        type Surface = RecordingSurface;
        fn open(&mut self) -> Option<RecordingSurface> {
            self.log.0.borrow_mut().push("open".into());
            self.available
                .then(|| RecordingSurface(Rc::clone(&self.log.0)))
        }
    }

    #[test]
    fn print_writes_then_prints() {
        let mut host = RecordingHost {
            available: true,
            log: Log::default(),
        };
        print_document(&mut host, &doc());
        let calls = host.log.0.borrow().clone();
        assert_eq!(
            calls,
            vec![
                "open".to_string(),
                format!("write:{}", doc().html.len()),
                "close".into(),
                "focus".into(),
                "print".into()
            ]
        );
    }

    #[test]
    fn print_is_silent_no_op_when_blocked() {
        let mut host = RecordingHost {
            available: false,
            log: Log::default(),
        };
        print_document(&mut host, &doc());
        assert_eq!(host.log.0.borrow().as_slice(), ["open".to_string()]);
    }

    #[test]
    fn spool_surface_injects_auto_print_before_body_end() {
        let mut surface = SpoolSurface {
            path: PathBuf::from("unused.html"),
            buffer: String::new(),
            closed: false,
        };
        surface.write(&doc().html);
        surface.close();
        surface.write("ignored after close");
        let html = surface.printable_html();
        assert!(html.contains("window.print()"));
        assert!(html.find("window.print()").unwrap() < html.find("</body>").unwrap());
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn sweep_removes_only_expired_spool_files() {
        let dir = tempfile::tempdir().unwrap();
        let spool = dir.path().join("print-1-0.html");
        let other = dir.path().join("notes.html");
        fs::write(&spool, "x").unwrap();
        fs::write(&other, "y").unwrap();

        assert_eq!(sweep_spool(dir.path(), SPOOL_RETENTION), 0);
        assert!(spool.exists());

        assert_eq!(sweep_spool(dir.path(), Duration::ZERO), 1);
        assert!(!spool.exists());
        assert!(other.exists());
    }

    #[test]
    fn sweep_of_missing_directory_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(sweep_spool(&dir.path().join("absent"), Duration::ZERO), 0);
    }

    // -- download ------------------------------------------------------------

    #[derive(Default)]
    struct CountingHost {
        created: usize,
        clicks: Vec<Anchor>,
        revoked: Vec<String>,
        fail_click: bool,
    }

    impl DownloadHost for CountingHost {
        fn create_object_url(&mut self, blob: Blob) -> String {
            self.created += 1;
            assert_eq!(blob.mime, HTML_MIME);
            format!("blob:test/{}", self.created)
        }
        fn click(&mut self, anchor: &Anchor) -> Result<()> {
            self.clicks.push(anchor.clone());
            if self.fail_click {
                Err(ForgeError::UnknownObjectUrl)
            } else {
                Ok(())
            }
        }
        fn revoke_object_url(&mut self, url: &str) {
            self.revoked.push(url.to_string());
        }
    }

    #[test]
    fn download_clicks_once_and_revokes_once() {
        let mut host = CountingHost::default();
        download_as_file(&mut host, &doc(), "acme-invoice.html").unwrap();

        assert_eq!(host.created, 1);
        assert_eq!(host.clicks.len(), 1);
        assert_eq!(host.clicks[0].download, "acme-invoice.html");
        assert_eq!(host.clicks[0].href, "blob:test/1");
        assert!(host.clicks[0].hidden);
        assert_eq!(host.revoked, vec!["blob:test/1".to_string()]);
    }

    #[test]
    fn download_revokes_even_when_click_fails() {
        let mut host = CountingHost {
            fail_click: true,
            ..CountingHost::default()
        };
        assert!(download_as_file(&mut host, &doc(), "x.html").is_err());
        assert_eq!(host.revoked.len(), 1);
    }

    #[test]
    fn directory_downloads_write_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = DirectoryDownloads::new(dir.path());
        download_as_file(&mut host, &doc(), "acme-invoice.html").unwrap();

        let written = fs::read_to_string(dir.path().join("acme-invoice.html")).unwrap();
        assert_eq!(written, doc().html);
        assert_eq!(host.live_urls(), 0);
    }

    #[test]
    fn directory_downloads_reject_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = DirectoryDownloads::new(dir.path());
        let err = download_as_file(&mut host, &doc(), "../escape.html").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidFilename(_)));
        assert_eq!(host.live_urls(), 0);
    }

    #[test]
    fn directory_downloads_refuse_revoked_urls() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = DirectoryDownloads::new(dir.path());
        let url = host.create_object_url(Blob {
            bytes: b"x".to_vec(),
            mime: HTML_MIME.into(),
        });
        host.revoke_object_url(&url);
        let anchor = Anchor {
            href: url,
            download: "x.html".into(),
            hidden: true,
        };
        assert!(matches!(host.click(&anchor), Err(ForgeError::UnknownObjectUrl)));
    }
}
