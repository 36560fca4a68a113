use anyhow::{Context, Result};
use chrono::Local;
use recipe_planner::cli::{parse_args, Cli};
use recipe_planner::commands::{self, Command, HELP};
use recipe_planner::config::{GeneratorConfig, SessionConfig};
use recipe_planner::generator::{
    ChatCompletionGenerator, RecipeGenerator, KNOWN_CUISINES, KNOWN_DIETS,
};
use recipe_planner::image_capture::capture_file;
use recipe_planner::logging;
use recipe_planner::meal_plan::MealPlan;
use recipe_planner::pantry::Pantry;
use recipe_planner::recipe::RecipeEntry;
use recipe_planner::session::{SearchOutcome, Session, StoreObserver, User};
use recipe_planner::shopping_list::recompute;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Logs the size of the shopping list whenever the stores change.
struct ShoppingListLog;

impl StoreObserver for ShoppingListLog {
    fn on_stores_changed(&mut self, pantry: &Pantry, plan: &MealPlan) {
        let list = recompute(pantry, plan);
        tracing::info!(
            pantry_items = pantry.len(),
            planned_meals = plan.len(),
            shopping_items = list.len(),
            "stores changed"
        );
    }
}

fn session_config(cli: &Cli) -> SessionConfig {
    let mut config = SessionConfig {
        user: Some(User {
            id: "local".to_string(),
            name: cli.user.clone(),
            email: "local@localhost".to_string(),
        }),
        ..SessionConfig::default()
    };
    if cli.empty_pantry {
        config.seed_pantry.clear();
    } else if let Some(pantry) = &cli.pantry {
        config.seed_pantry = pantry.clone();
    }
    config
}

fn print_entry(index: Option<usize>, entry: &RecipeEntry, favorite: bool) {
    let recipe = entry.recipe();
    let prefix = index.map(|i| format!("{:>2}. ", i + 1)).unwrap_or_default();
    let star = if favorite { " *" } else { "" };
    match entry.match_percentage() {
        Some(pct) => println!("{prefix}{}{star} ({pct:.0}% match)", recipe.name),
        None => println!("{prefix}{}{star}", recipe.name),
    }
}

fn print_selected(session: &Session) {
    let Some(entry) = session.selected() else {
        println!("No recipe selected.");
        return;
    };
    let recipe = entry.recipe();
    print_entry(None, entry, session.is_favorite(&recipe.id));
    println!("  {}", recipe.description);
    println!(
        "  {:.0} kcal, {:.1} g fat, {:.1} g carbs, {:.1} g protein",
        recipe.nutrition.calories,
        recipe.nutrition.fat_g,
        recipe.nutrition.carbs_g,
        recipe.nutrition.protein_g
    );
    println!("  ingredients:");
    for ingredient in &recipe.required_ingredients {
        let mark = if session.pantry().contains(ingredient) { "x" } else { " " };
        println!("    [{mark}] {ingredient}");
    }
    for (step, line) in recipe.steps().enumerate() {
        println!("  {}. {}", step + 1, line);
    }
    println!("  image: {}", recipe.image_url);
}

/// Returns false when the session should end.
async fn run_command(
    session: &mut Session,
    generator: &dyn RecipeGenerator,
    command: Command,
) -> Result<bool> {
    match command {
        Command::Pantry => {
            println!("My Pantry ({})", session.pantry().len());
            for item in session.pantry().items() {
                println!("  {item}");
            }
        }
        Command::Add(item) => {
            if !session.add_pantry_item(&item) {
                println!("\"{}\" is already in the pantry.", item.trim());
            }
        }
        Command::Remove(item) => {
            session.remove_pantry_item(&item);
        }
        Command::Rename { old, new } => {
            if let Err(e) = session.rename_pantry_item(&old, &new) {
                println!("{e}");
            }
        }
        Command::Find(filters) => {
            println!("Finding recipes...");
            match session.find_recipes(generator, filters).await {
                SearchOutcome::Suppressed => {
                    println!("Add some ingredients to your pantry first.")
                }
                SearchOutcome::Failed => {
                    println!("{}", session.search().error().unwrap_or_default())
                }
                SearchOutcome::Found(0) => println!("No recipes found."),
                SearchOutcome::Found(_) => {
                    for (i, entry) in session.search().results().iter().enumerate() {
                        print_entry(Some(i), entry, session.is_favorite(&entry.recipe().id));
                    }
                }
            }
        }
        Command::Results => {
            for (i, entry) in session.search().results().iter().enumerate() {
                print_entry(Some(i), entry, session.is_favorite(&entry.recipe().id));
            }
        }
        Command::Select(index) => {
            if session.select_search_result(index) {
                print_selected(session);
            } else {
                println!("No result {}.", index + 1);
            }
        }
        Command::SelectFavorite(id) => {
            if session.select_favorite(&id) {
                print_selected(session);
            } else {
                println!("No favorite {id}.");
            }
        }
        Command::SelectMeal(id) => {
            if session.select_meal(id) {
                print_selected(session);
            } else {
                println!("No planned meal {id}.");
            }
        }
        Command::Show => print_selected(session),
        Command::Back => session.clear_selection(),
        Command::Favorite => match session.selected().map(|e| e.recipe().clone()) {
            Some(recipe) => {
                let now = session.toggle_favorite(&recipe);
                println!(
                    "{} {} favorites.",
                    recipe.name,
                    if now { "added to" } else { "removed from" }
                );
            }
            None => println!("No recipe selected."),
        },
        Command::Favorites => {
            for recipe in session.favorites().recipes() {
                println!("  {} [{}]", recipe.name, recipe.id);
            }
        }
        Command::Plan(date) => match session.selected().map(|e| e.recipe().clone()) {
            Some(recipe) => {
                let id = session.plan_meal(recipe, date);
                println!("Planned for {date} as {id}.");
            }
            None => println!("No recipe selected."),
        },
        Command::Meals => {
            for meal in session.meal_plan().meals() {
                println!("  {} {} [{}]", meal.date, meal.recipe.name, meal.id);
            }
        }
        Command::Week(start) => {
            let start = start.unwrap_or_else(|| Local::now().date_naive());
            for day in session.meal_plan().week_from(start) {
                println!("{}", day.date.format("%a %b %-d"));
                for meal in day.meals {
                    println!("  {} [{}]", meal.recipe.name, meal.id);
                }
            }
        }
        Command::Unplan(id) => {
            session.unplan_meal(id);
        }
        Command::Shopping => {
            let list = session.shopping_list();
            if list.is_empty() {
                println!("Your shopping list is empty.");
            }
            for item in list.sorted() {
                println!("  [ ] {item}");
            }
        }
        Command::Refresh => {
            let count = session.refresh_shopping_list().len();
            println!("Shopping list has {count} item(s).");
        }
        Command::Image(path) => {
            if session.selected().is_none() {
                println!("No recipe selected.");
            } else {
                match capture_file(&path).await {
                    Ok(image) => {
                        if let Some(update) = session.replace_selected_image(&image) {
                            println!(
                                "Image updated ({} favorite(s), {} planned meal(s)).",
                                update.favorites, update.planned_meals
                            );
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
        Command::Profile => {
            let profile = session.profile();
            match profile.user {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not logged in."),
            }
            println!("  pantry items:  {}", profile.pantry_items);
            println!("  favorites:     {}", profile.favorites);
            println!("  planned meals: {}", profile.planned_meals);
        }
        Command::Logout => {
            session.logout();
            println!("Logged out.");
        }
        Command::Help => {
            println!("{HELP}");
            println!("cuisines: {}", KNOWN_CUISINES.join(", "));
            println!("diets: {}", KNOWN_DIETS.join(", "));
        }
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

async fn run_lines<R>(
    reader: R,
    session: &mut Session,
    generator: &dyn RecipeGenerator,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        match commands::parse(&line) {
            Ok(Some(command)) => {
                if !run_command(session, generator, command).await? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = parse_args();
    logging::init(&cli.log_level).context("Failed to initialise logging")?;

    let generator_config = GeneratorConfig::from_env().context("Invalid generator configuration")?;
    let generator = ChatCompletionGenerator::new(generator_config);

    let mut session = Session::new(session_config(&cli));
    session.register_observer(Box::new(ShoppingListLog));

    if let Some(user) = session.user() {
        println!("Welcome, {}! Type `help` for commands.", user.name);
    }

    match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script '{}'", path))?;
            run_lines(BufReader::new(file), &mut session, &generator).await?;
        }
        None => {
            run_lines(BufReader::new(tokio::io::stdin()), &mut session, &generator).await?;
        }
    }

    Ok(())
}
