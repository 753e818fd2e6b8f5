use stories_core::{AppViewModel, StoryRowView};

pub fn render(view: &AppViewModel) -> String {
    let mut lines = vec![
        format!("My Hacker Stories with {} comments.", view.comment_sum),
        format!("Search: {}", view.draft_query),
    ];

    if view.is_error {
        lines.push("Something went wrong...".to_string());
    }

    if view.is_loading {
        lines.push("Loading...".to_string());
    } else if view.rows.is_empty() {
        lines.push("No results".to_string());
    } else {
        lines.extend(view.rows.iter().map(render_row));
        if view.story_count > view.rows.len() {
            lines.push(format!(
                "   ({} more not shown)",
                view.story_count - view.rows.len()
            ));
        }
    }

    lines.join("\n")
}

fn render_row(row: &StoryRowView) -> String {
    let story = &row.story;
    let link = if story.url.is_empty() {
        String::new()
    } else {
        format!(" <{}>", story.url)
    };
    format!(
        "{:>2}. {}{} | {} | {} comments | {} points",
        row.position, story.title, link, story.author, story.comment_count, story.points
    )
}
