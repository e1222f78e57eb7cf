//! mc-tui-demo: wires `mc-tui-core` into a runnable program with a root
//! menu screen and a detail screen, solely to exercise the engine loop.

mod cli;
mod screens;

use anyhow::Context;
use tracing::info;

use mc_tui_core::app::{Application, RunFlags};
use mc_tui_core::framebuffer::FrameBuffer;
use mc_tui_core::key::{BaseKey, KeyCombination, Modifiers, NamedKey};
use mc_tui_core::keybinding::{KeyBinding, KeyBindingRegistry};
use mc_tui_core::menu::{MenuDefinition, MenuItem, MenuSystem};
use mc_tui_core::screen::ScreenStack;
use mc_tui_core::terminal::{RealTerminal, Terminal};
use mc_tui_core::theme::ThemeContext;

use cli::Cli;
use screens::{DetailScreen, RootMenuScreen};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let _log_guard = init_logging(&cli.log_file)?;

    info!(fps = cli.fps, "starting mc-tui-demo");

    let term = RealTerminal::new();
    let (width, height) = term.size();

    let theme = if cli.no_color {
        ThemeContext::monochrome()
    } else {
        ThemeContext::default_dark()
    };
    let fb = FrameBuffer::new(width, height, theme);

    let flags = RunFlags::new();
    #[cfg(unix)]
    mc_tui_core::app::install_signal_handlers(flags.clone())
        .context("failed to install signal handlers")?;

    let mut screens = ScreenStack::new();
    screens.push(Box::new(RootMenuScreen::new()));

    let mut bindings = KeyBindingRegistry::new();
    bindings.register(KeyBinding::new(
        KeyCombination::new(Modifiers::Ctrl, BaseKey::Char('D')),
        "demo.open_detail",
        "Open the detail screen",
        "navigation",
    ));
    bindings.register(KeyBinding::new(
        KeyCombination::new(Modifiers::Ctrl, BaseKey::Char('Q')),
        "demo.quit",
        "Quit",
        "app",
    ));

    let menus = vec![MenuDefinition {
        label: "Files".into(),
        fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F3)),
        items: vec![
            MenuItem::screen("Open detail", "detail"),
            MenuItem::Separator,
            MenuItem::action("Quit", {
                let flags = flags.clone();
                Box::new(move || flags.request_stop())
            }),
        ],
        priority: 0,
    }];

    let quit_flags = flags.clone();
    let mut app = Application::builder()
        .fps(cli.fps)
        .flags(flags)
        .screens(screens)
        .menu_system(MenuSystem::new(menus))
        .bindings(bindings)
        .register_screen("detail", || Box::new(DetailScreen::new()))
        .action_handler(
            "demo.open_detail",
            Box::new(|stack: &mut ScreenStack| {
                if stack.current().map(|s| s.type_name()) != Some("detail") {
                    stack.push(Box::new(DetailScreen::new()));
                }
            }),
        )
        .action_handler(
            "demo.quit",
            Box::new(move |_stack: &mut ScreenStack| quit_flags.request_stop()),
        )
        .build(fb)
        .context("failed to build application")?;

    let mut term = term;
    app.run(&mut term).context("application loop failed")?;

    info!("mc-tui-demo exiting");
    Ok(())
}

fn init_logging(log_file: &str) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let path = std::path::Path::new(log_file);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .context("log file path has no file name")?;

    let file_appender = match dir {
        Some(dir) => tracing_appender::rolling::never(dir, file_name),
        None => tracing_appender::rolling::never(".", file_name),
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    Ok(guard)
}
