use super::{normalize_text, TodoId, TodoItem, TodoStore};

/// In-memory todo list, gone when the app exits
#[derive(Debug, Default)]
pub struct LocalTodoStore {
    items: Vec<TodoItem>,
    last_id: i64,
}

impl LocalTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creation timestamp in millis, bumped past the last id so rapid adds stay unique
    fn next_id(&mut self) -> TodoId {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        TodoId(self.last_id)
    }
}

impl TodoStore for LocalTodoStore {
    fn items(&self) -> &[TodoItem] {
        &self.items
    }

    fn add(&mut self, text: &str) {
        let Some(text) = normalize_text(text) else {
            return;
        };
        let item = TodoItem {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
        };
        self.items.push(item);
    }

    fn toggle(&mut self, id: TodoId) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.completed = !item.completed;
        }
    }

    fn remove(&mut self, id: TodoId) {
        self.items.retain(|item| item.id != id);
    }

    fn label(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_adds_are_ignored() {
        let mut store = LocalTodoStore::new();
        store.add("");
        store.add("   ");
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_add_appends_trimmed_item() {
        let mut store = LocalTodoStore::new();
        store.add("first");
        store.add("  buy milk  ");

        assert_eq!(store.items().len(), 2);
        let item = &store.items()[1];
        assert_eq!(item.text, "buy milk");
        assert!(!item.completed);
    }

    #[test]
    fn test_rapid_adds_get_unique_increasing_ids() {
        let mut store = LocalTodoStore::new();
        for i in 0..50 {
            store.add(&format!("task {i}"));
        }
        let ids: Vec<TodoId> = store.items().iter().map(|i| i.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_toggle_flips_completion() {
        let mut store = LocalTodoStore::new();
        store.add("stretch");
        let id = store.items()[0].id;

        store.toggle(id);
        assert!(store.items()[0].completed);
        store.toggle(id);
        assert!(!store.items()[0].completed);
    }

    #[test]
    fn test_unknown_ids_change_nothing() {
        let mut store = LocalTodoStore::new();
        store.add("tea");
        let before = store.items().to_vec();

        store.toggle(TodoId(-1));
        store.remove(TodoId(-1));

        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = LocalTodoStore::new();
        store.add("a");
        store.add("b");
        store.add("c");
        let middle = store.items()[1].id;

        store.remove(middle);

        let texts: Vec<&str> = store.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }
}
