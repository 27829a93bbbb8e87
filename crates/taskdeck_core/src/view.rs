use crate::model::{Task, TaskFilter, TaskSort};
use std::cmp::Ordering;

/// Computes the display list from store state: search, then status filter,
/// then a stable sort. Pure function of its inputs; storage order of the
/// input slice is never mutated.
pub fn compose_view(
    tasks: &[Task],
    filter: TaskFilter,
    sort: TaskSort,
    search_query: &str,
) -> Vec<Task> {
    let query = search_query.trim().to_lowercase();
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_search(task, &query))
        .filter(|task| matches_filter(task, filter))
        .cloned()
        .collect();
    visible.sort_by(|a, b| compare(a, b, sort));
    visible
}

fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    if task.title.to_lowercase().contains(query) {
        return true;
    }
    task.description
        .as_deref()
        .is_some_and(|text| text.to_lowercase().contains(query))
}

fn matches_filter(task: &Task, filter: TaskFilter) -> bool {
    match filter {
        TaskFilter::All => true,
        TaskFilter::Pending => !task.completed,
        TaskFilter::Completed => task.completed,
    }
}

fn compare(a: &Task, b: &Task, sort: TaskSort) -> Ordering {
    match sort {
        TaskSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        // Dateless tasks sort after every dated one; two dateless tasks keep
        // their relative order (the sort is stable).
        TaskSort::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        },
        TaskSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
        TaskSort::CreatedAt => b.created_at.cmp(&a.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::compose_view;
    use crate::model::timestamp::parse_date;
    use crate::model::{Priority, Task, TaskFilter, TaskSort, Timestamp};

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            completed,
            priority: Priority::Medium,
            due_date: None,
            created_at: Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
            updated_at: Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
        }
    }

    #[test]
    fn pending_filter_excludes_completed_tasks() {
        let tasks = vec![
            task("task-1", "open", false),
            task("task-2", "done", true),
        ];

        let view = compose_view(&tasks, TaskFilter::Pending, TaskSort::CreatedAt, "");
        assert_eq!(view.len(), 1);
        assert!(view.iter().all(|task| !task.completed));

        let view = compose_view(&tasks, TaskFilter::Completed, TaskSort::CreatedAt, "");
        assert_eq!(view.len(), 1);
        assert!(view.iter().all(|task| task.completed));
    }

    #[test]
    fn all_filter_returns_search_matches_regardless_of_completion() {
        let mut pay = task("task-1", "Pay rent", true);
        pay.description = Some("transfer before the 5th".to_string());
        let tasks = vec![
            pay,
            task("task-2", "Buy milk", false),
            task("task-3", "Walk dog", false),
        ];

        let view = compose_view(&tasks, TaskFilter::All, TaskSort::CreatedAt, "RENT");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "task-1");

        let view = compose_view(&tasks, TaskFilter::All, TaskSort::CreatedAt, "transfer");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "task-1");
    }

    #[test]
    fn priority_sorts_high_medium_low() {
        let mut low = task("task-1", "low", false);
        low.priority = Priority::Low;
        let mut high = task("task-2", "high", false);
        high.priority = Priority::High;
        let mut medium = task("task-3", "medium", false);
        medium.priority = Priority::Medium;

        let view = compose_view(
            &[low, high, medium],
            TaskFilter::All,
            TaskSort::Priority,
            "",
        );
        let titles: Vec<&str> = view.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, ["high", "medium", "low"]);
    }

    #[test]
    fn due_date_sorts_ascending_with_dateless_last() {
        let no_date = task("task-1", "someday", false);
        let mut later = task("task-2", "later", false);
        later.due_date = Some(parse_date("2024-01-01").unwrap());
        let mut sooner = task("task-3", "sooner", false);
        sooner.due_date = Some(parse_date("2023-01-01").unwrap());

        let view = compose_view(
            &[no_date, later, sooner],
            TaskFilter::All,
            TaskSort::DueDate,
            "",
        );
        let ids: Vec<&str> = view.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, ["task-3", "task-2", "task-1"]);
    }

    #[test]
    fn dateless_tasks_keep_relative_order() {
        let first = task("task-1", "first", false);
        let second = task("task-2", "second", false);

        let view = compose_view(&[first, second], TaskFilter::All, TaskSort::DueDate, "");
        let ids: Vec<&str> = view.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-2"]);
    }

    #[test]
    fn created_at_sorts_newest_first() {
        let mut older = task("task-1", "older", false);
        older.created_at = Timestamp::parse("2023-06-01T00:00:00Z").unwrap();
        let mut newer = task("task-2", "newer", false);
        newer.created_at = Timestamp::parse("2024-06-01T00:00:00Z").unwrap();

        let view = compose_view(&[older, newer], TaskFilter::All, TaskSort::CreatedAt, "");
        let ids: Vec<&str> = view.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, ["task-2", "task-1"]);
    }

    #[test]
    fn title_sorts_case_insensitively() {
        let tasks = vec![
            task("task-1", "banana", false),
            task("task-2", "Apple", false),
            task("task-3", "cherry", false),
        ];

        let view = compose_view(&tasks, TaskFilter::All, TaskSort::Title, "");
        let titles: Vec<&str> = view.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, ["Apple", "banana", "cherry"]);
    }
}
