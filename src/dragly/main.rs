use clap::Parser;
use dragly::api::QueueStore;
use dragly::clipboard::copy_to_clipboard;
use dragly::config::{resolve_data_dir, DraglyConfig};
use dragly::error::{DraglyError, Result};
use dragly::export;
use dragly::index::{index_items, parse_indexes, resolve_indexes, DisplayIndex};
use dragly::model::ItemId;
use dragly::store::fs::FsBackend;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands};
use cli::print::{print_info, print_items, print_success};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    store: QueueStore<FsBackend>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::List { active }) => handle_list(&ctx, active),
        Some(Commands::Edit { index, text }) => handle_edit(&mut ctx, index, text),
        Some(Commands::Toggle { indexes }) => handle_toggle(&mut ctx, indexes),
        Some(Commands::Used { indexes }) => handle_used(&mut ctx, indexes),
        Some(Commands::Remove { indexes }) => handle_remove(&mut ctx, indexes),
        Some(Commands::Copy { index, print }) => handle_copy(&mut ctx, index, print),
        Some(Commands::Move { index, to }) => handle_move(&mut ctx, index, to),
        Some(Commands::Clear { all }) => handle_clear(&mut ctx, all),
        Some(Commands::Path) => handle_path(&ctx),
        None => handle_list(&ctx, false),
    };

    // Shutdown hook: retry a save that failed during the command, if any.
    ctx.store.flush();
    result
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "dragly=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let config = DraglyConfig::load_or_default(&data_dir);
    let store = QueueStore::open(FsBackend::new(data_dir), &config);
    Ok(AppContext { store })
}

fn handle_add(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let text = text.join(" ");
    let id = ctx
        .store
        .add(&text)
        .ok_or_else(|| DraglyError::Api("Snippet text cannot be empty".into()))?;
    print_success(format!("Added (1): {}", item_text(ctx, id)));
    Ok(())
}

fn handle_list(ctx: &AppContext, active_only: bool) -> Result<()> {
    let mut entries = index_items(ctx.store.items());
    if active_only {
        entries.retain(|entry| !entry.item.is_used());
    }
    print_items(&entries);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, text: Vec<String>) -> Result<()> {
    let id = resolve_one(ctx, &index)?;
    let text = text.join(" ");
    if text.trim().is_empty() {
        return Err(DraglyError::Api("Snippet text cannot be empty".into()));
    }
    if ctx.store.update(id, &text) {
        print_success(format!("Updated ({}): {}", index, item_text(ctx, id)));
    } else {
        print_info(format!("Unchanged ({})", index));
    }
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for (idx, id) in resolve_many(ctx, &indexes)? {
        ctx.store.toggle(id);
        let state = if is_used(ctx, id) { "used" } else { "active" };
        print_success(format!("Marked {} ({}): {}", state, idx, item_text(ctx, id)));
    }
    Ok(())
}

fn handle_used(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for (idx, id) in resolve_many(ctx, &indexes)? {
        if ctx.store.mark_used(id) {
            print_success(format!("Marked used ({}): {}", idx, item_text(ctx, id)));
        } else {
            print_info(format!("Already used ({}): {}", idx, item_text(ctx, id)));
        }
    }
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for (idx, id) in resolve_many(ctx, &indexes)? {
        let text = item_text(ctx, id);
        ctx.store.remove(id);
        print_success(format!("Removed ({}): {}", idx, text));
    }
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, index: Option<String>, print: bool) -> Result<()> {
    let (label, id) = match index {
        Some(index) => {
            let id = resolve_one(ctx, &index)?;
            (index, id)
        }
        None => {
            let (pos, item) = ctx
                .store
                .items()
                .iter()
                .enumerate()
                .find(|(_, item)| !item.is_used())
                .ok_or_else(|| DraglyError::Api("No active snippets to copy".into()))?;
            ((pos + 1).to_string(), item.id())
        }
    };

    if is_used(ctx, id) {
        return Err(DraglyError::Api(format!("Snippet {} is already used", label)));
    }

    let copied = export::copy(&mut ctx.store, id, |text| {
        if print {
            println!("{}", text);
            Ok(())
        } else {
            copy_to_clipboard(text)
        }
    })?;

    if copied && !print {
        print_success(format!("Copied ({}): {}", label, item_text(ctx, id)));
    }
    Ok(())
}

fn handle_move(ctx: &mut AppContext, index: String, to: String) -> Result<()> {
    let id = resolve_one(ctx, &index)?;
    let target: DisplayIndex = to.parse().map_err(DraglyError::Api)?;
    if ctx.store.move_item(id, target.offset()) {
        print_success(format!("Moved ({} -> {}): {}", index, target, item_text(ctx, id)));
    } else {
        print_info(format!("Unchanged ({})", index));
    }
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, all: bool) -> Result<()> {
    let removed = if all {
        ctx.store.clear_all()
    } else {
        ctx.store.clear_used()
    };
    let what = if all { "snippet" } else { "used snippet" };
    let plural = if removed == 1 { "" } else { "s" };
    print_success(format!("Cleared {} {}{}", removed, what, plural));
    Ok(())
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    let gateway = ctx.store.gateway();
    let path = gateway.backend().slot_path(gateway.key())?;
    println!("{}", path.display());
    Ok(())
}

fn resolve_one(ctx: &AppContext, input: &str) -> Result<ItemId> {
    let indexes = parse_indexes(&[input])?;
    if indexes.len() != 1 {
        return Err(DraglyError::Api(format!(
            "Expected a single index, got {}",
            input
        )));
    }
    let ids = resolve_indexes(ctx.store.items(), &indexes)?;
    Ok(ids[0])
}

fn resolve_many(ctx: &AppContext, inputs: &[String]) -> Result<Vec<(DisplayIndex, ItemId)>> {
    let indexes = parse_indexes(inputs)?;
    let ids = resolve_indexes(ctx.store.items(), &indexes)?;
    Ok(indexes.into_iter().zip(ids).collect())
}

fn item_text(ctx: &AppContext, id: ItemId) -> String {
    ctx.store
        .find(id)
        .map(|item| item.text().to_string())
        .unwrap_or_default()
}

fn is_used(ctx: &AppContext, id: ItemId) -> bool {
    ctx.store.find(id).is_some_and(|item| item.is_used())
}
