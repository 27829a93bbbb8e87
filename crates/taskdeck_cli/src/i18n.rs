//! Lookup-by-key message dictionary for the two supported locales.
//! The core stays locale-agnostic; only user-facing CLI strings go through
//! here. Unknown keys fall back to the key itself.

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "zh-tw"];

pub fn tr(lang: &str, key: &'static str) -> &'static str {
    match lang {
        "zh-tw" => zh_tw(key),
        _ => en(key),
    }
}

fn en(key: &'static str) -> &'static str {
    match key {
        "task.added" => "Added task",
        "task.updated" => "Updated task",
        "task.deleted" => "Deleted task",
        "task.completed" => "Completed task",
        "task.reopened" => "Reopened task",
        "task.not_found" => "task not found",
        "tasks.cleared" => "All tasks cleared",
        "tasks.empty" => "No tasks",
        "confirm.delete.title" => "Delete task",
        "confirm.delete.message" => "This task will be removed permanently. Continue?",
        "confirm.clear.title" => "Clear all tasks",
        "confirm.clear.message" => "Every task and the stored data will be erased. Continue?",
        "confirm.accept" => "Yes",
        "confirm.cancel" => "Cancel",
        "action.cancelled" => "Cancelled",
        "export.done" => "Exported tasks to",
        "import.done" => "Imported tasks from",
        "info.last_saved" => "Last saved",
        "info.task_count" => "Stored tasks",
        "info.no_data" => "No stored data",
        "warn.autosave" => "autosave failed",
        other => other,
    }
}

fn zh_tw(key: &'static str) -> &'static str {
    match key {
        "task.added" => "已新增任務",
        "task.updated" => "已更新任務",
        "task.deleted" => "已刪除任務",
        "task.completed" => "已完成任務",
        "task.reopened" => "已重新開啟任務",
        "task.not_found" => "找不到任務",
        "tasks.cleared" => "已清除所有任務",
        "tasks.empty" => "沒有任務",
        "confirm.delete.title" => "刪除任務",
        "confirm.delete.message" => "此任務將被永久移除，確定繼續嗎？",
        "confirm.clear.title" => "清除所有任務",
        "confirm.clear.message" => "所有任務與儲存的資料都會被清除，確定繼續嗎？",
        "confirm.accept" => "確認",
        "confirm.cancel" => "取消",
        "action.cancelled" => "已取消",
        "export.done" => "已匯出任務至",
        "import.done" => "已從檔案匯入任務",
        "info.last_saved" => "最後儲存時間",
        "info.task_count" => "已儲存任務數",
        "info.no_data" => "沒有儲存的資料",
        "warn.autosave" => "自動儲存失敗",
        other => other,
    }
}
