use crate::app::{AppContext, MirrorError, Result};
use crate::cli::ThemeAction;
use crate::domain::{Platform, Release};
use crate::pipeline::{self, BoundKind, DateBound, FilterCriteria, Pager, SortOrder};

pub struct ListOptions {
    pub search: String,
    pub from: String,
    pub to: String,
    pub oldest: bool,
    /// `None` prints everything.
    pub limit: Option<usize>,
}

pub async fn list_releases(ctx: &AppContext, options: ListOptions) -> Result<()> {
    for (name, value, kind) in [
        ("--from", &options.from, BoundKind::Lower),
        ("--to", &options.to, BoundKind::Upper),
    ] {
        if DateBound::parse(value, kind).is_invalid() {
            // Still fails closed below; this just explains the empty output
            eprintln!("Warning: {} {:?} is not a valid date (YYYY-MM-DD)", name, value);
        }
    }

    let store = ctx.load_releases().await;
    if let Some(message) = store.error() {
        return Err(MirrorError::Other(message.to_string()));
    }

    let criteria = FilterCriteria {
        search: options.search,
        from: options.from,
        to: options.to,
        sort: if options.oldest {
            SortOrder::Oldest
        } else {
            SortOrder::Newest
        },
    };

    let visible = pipeline::apply(store.releases(), &criteria);
    if visible.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let mut pager = Pager::with_batch_size(options.limit.unwrap_or(visible.len()));
    pager.reset(visible);

    for release in pager.displayed() {
        println!("{}", format_release_line(release));
    }

    if pager.has_more() {
        println!(
            "... {} more (use --limit or --all)",
            pager.total() - pager.displayed().len()
        );
    }

    Ok(())
}

/// `YYYY-MM-DD  tag  title  [Windows, Linux]`
pub fn format_release_line(release: &Release) -> String {
    let date = release
        .published()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    let platforms: Vec<&str> = [Platform::Windows, Platform::Linux]
        .into_iter()
        .filter(|p| release.asset_for(*p).is_some())
        .map(Platform::label)
        .collect();

    if platforms.is_empty() {
        format!("{}  {}  {}", date, release.tag_name, release.display_title())
    } else {
        format!(
            "{}  {}  {}  [{}]",
            date,
            release.tag_name,
            release.display_title(),
            platforms.join(", ")
        )
    }
}

pub fn theme(ctx: &AppContext, action: ThemeAction) -> Result<()> {
    let mut theme = ctx.theme()?;
    match action {
        ThemeAction::Show => println!("{}", theme.theme()),
        ThemeAction::Toggle => {
            let next = theme.toggle()?;
            println!("Theme set to {}", next);
        }
    }
    Ok(())
}
