// src/core/browser.rs
//
// Page source backed by a real Chromium, driven synchronously.
//
// chromiumoxide is async; the session owns a current-thread tokio runtime
// and blocks on each call. The CDP handler task only makes progress while
// the runtime is inside `block_on`, which is always the case when the
// session is talking to the browser.

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::options::BrowserOptions;
use crate::error::{Result, ScrapeError};

/// Where rendered HTML comes from. The runner only needs this.
pub trait PageSource {
    /// Rendered document for `url`. Any failure ends the run.
    fn fetch(&mut self, url: &str) -> Result<String>;
}

/// One browser process with one reused tab.
/// Closed by `close()` or, failing that, on drop.
pub struct ChromeSession {
    rt: Runtime,
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    settle: Duration,
}

impl ChromeSession {
    pub fn launch(opts: &BrowserOptions) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        let mut builder = BrowserConfig::builder();
        if !opts.headless {
            builder = builder.with_head();
        }
        if opts.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &opts.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScrapeError::BrowserLaunch)?;

        let (browser, mut handler) = rt
            .block_on(Browser::launch(config))
            .map_err(|e| {
                loge!("Error initializing driver: {e}");
                ScrapeError::BrowserLaunch(e.to_string())
            })?;

        let handler = rt.spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let mut session = Self {
            rt,
            browser: Some(browser),
            page: None,
            handler: Some(handler),
            settle: opts.settle,
        };

        let page = match session.browser.as_ref() {
            Some(b) => session.rt.block_on(b.new_page("about:blank"))?,
            None => return Err(ScrapeError::BrowserLaunch(s!("browser vanished during launch"))),
        };
        session.page = Some(page);

        logf!("Driver initialized successfully.");
        Ok(session)
    }

    /// Shut the browser down. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        self.page = None;
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = self.rt.block_on(async {
            browser.close().await?;
            let _ = browser.wait().await;
            Ok::<_, ScrapeError>(())
        });

        if let Some(handler) = self.handler.take() {
            reap_handler(&self.rt, handler, closed.is_err());
        }

        closed?;
        logf!("Driver quit successfully.");
        Ok(())
    }
}

// Wait for the CDP handler loop to finish. After a failed close the
// connection can stay up and the loop never ends, so it is cancelled.
fn reap_handler(rt: &Runtime, handler: JoinHandle<()>, cancel: bool) {
    if cancel {
        handler.abort();
    }
    let _ = rt.block_on(handler);
}

impl PageSource for ChromeSession {
    fn fetch(&mut self, url: &str) -> Result<String> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| ScrapeError::BrowserLaunch(s!("session already closed")))?;
        let settle = self.settle;

        logd!("navigate {url}");
        self.rt.block_on(async {
            page.goto(url).await?;
            tokio::time::sleep(settle).await;
            Ok::<_, ScrapeError>(page.content().await?)
        })
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            if let Err(e) = self.close() {
                loge!("Error closing driver: {e}");
            }
        }
    }
}
