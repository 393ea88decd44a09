use crate::models::{Priority, ProgressResponse, TaskKind};

pub fn render_index(progress: &ProgressResponse) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &progress.today)
        .replace("{{STREAK}}", &progress.streak.to_string())
        .replace("{{TOTAL}}", &progress.total_tasks.to_string())
        .replace("{{TYPE_OPTIONS}}", &options(&TaskKind::NAMES))
        .replace("{{PRIORITY_OPTIONS}}", &options(&Priority::NAMES))
}

fn options(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!(r#"<option value="{name}">{name}</option>"#))
        .collect::<Vec<_>>()
        .join("")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>TaskFlow</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef5ec;
      --bg-2: #c9e6c3;
      --ink: #2b2a28;
      --accent: #4caf50;
      --accent-2: #2f4858;
      --muted: #e0e0e0;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4fbf2 60%, #f9f9f4 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.15rem;
      color: var(--accent-2);
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
    }

    nav {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    nav button {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.15);
      background: white;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      cursor: pointer;
    }

    nav button.active {
      background: var(--accent-2);
      color: white;
    }

    .view {
      display: none;
      gap: 24px;
    }

    .view.active {
      display: grid;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .calendar .head {
      text-align: center;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    .tile {
      padding: 10px 0;
      border-radius: 10px;
      text-align: center;
      font-weight: 600;
      transition: transform 0.2s ease;
    }

    .tile:hover {
      transform: scale(1.08);
    }

    .tile.completed {
      background: var(--accent);
      color: white;
    }

    .tile.incomplete {
      background: var(--muted);
    }

    .progress {
      height: 14px;
      border-radius: 999px;
      background: var(--muted);
      overflow: hidden;
    }

    .progress div {
      height: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .bars {
      display: grid;
      gap: 8px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 110px 1fr 40px;
      align-items: center;
      gap: 10px;
      font-size: 0.9rem;
    }

    .bar-row .fill {
      height: 12px;
      border-radius: 6px;
      background: var(--accent-2);
    }

    form, .row {
      display: grid;
      gap: 10px;
    }

    label {
      font-size: 0.85rem;
      color: #5f5c57;
    }

    input, select, textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .primary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .danger {
      background: #c0392b;
    }

    .todo {
      display: grid;
      grid-template-columns: 32px 1fr auto auto auto;
      align-items: center;
      gap: 12px;
      padding: 8px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .todo.done .text {
      text-decoration: line-through;
      color: #8b857d;
    }

    .todo button {
      appearance: none;
      border: none;
      background: none;
      color: #c0392b;
      cursor: pointer;
      font: inherit;
    }

    .empty {
      color: #8b857d;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
    }

    .status.ok {
      color: var(--accent);
    }

    .status.error {
      color: #c0392b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>TaskFlow: Your Daily Productivity Companion</h1>
      <p class="subtitle">Today is {{TODAY}} &middot; streak {{STREAK}} days &middot; {{TOTAL}} tasks logged</p>
    </header>

    <nav role="tablist">
      <button class="active" data-view="track">Track Progress</button>
      <button data-view="log">Log Tasks</button>
      <button data-view="reset">Reset Data</button>
    </nav>

    <p class="status" id="status"></p>

    <section class="view active" id="view-track">
      <div class="card">
        <h2 id="calendar-title">Progress Tracker</h2>
        <div class="calendar" id="calendar"></div>
      </div>
      <div class="card">
        <h2>Streak Tracker</h2>
        <div class="progress"><div id="streak-bar" style="width: 0%"></div></div>
        <p id="streak-text">Current Streak: 0 days</p>
      </div>
      <div class="card">
        <h2>Task Distribution</h2>
        <div class="bars" id="distribution"></div>
      </div>
      <div class="card">
        <h2>Tasks Per Day</h2>
        <div class="bars" id="per-day"></div>
      </div>
    </section>

    <section class="view" id="view-log">
      <div class="card">
        <h2>Log a Task</h2>
        <form id="task-form" method="post" action="/tasks/log">
          <label>Task Type <select name="type">{{TYPE_OPTIONS}}</select></label>
          <label>Task Description <textarea name="description" rows="3"></textarea></label>
          <label>Priority <select name="priority">{{PRIORITY_OPTIONS}}</select></label>
          <button class="primary" type="submit">Log Task</button>
        </form>
      </div>
      <div class="card">
        <h2>To-Do List</h2>
        <form id="todo-form">
          <label>Add a new task <input name="task" type="text" /></label>
          <label>Priority <select name="priority">{{PRIORITY_OPTIONS}}</select></label>
          <label>Deadline Date <input name="deadline" type="date" value="{{TODAY}}" /></label>
          <button class="primary" type="submit">Add Task</button>
        </form>
        <div id="todos"></div>
      </div>
    </section>

    <section class="view" id="view-reset">
      <div class="card">
        <h2>Reset Data</h2>
        <p>Are you sure you want to reset all data? This action cannot be undone.</p>
        <button class="primary danger" id="reset-button">Confirm Reset</button>
      </div>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const WEEKDAYS = ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun'];

    const setStatus = (message, kind) => {
      statusEl.textContent = message;
      statusEl.className = `status ${kind}`;
    };

    const request = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const renderBars = (container, rows) => {
      container.replaceChildren();
      if (!rows.length) {
        container.appendChild(el('p', 'empty', 'No tasks logged yet.'));
        return;
      }
      const max = Math.max(...rows.map((row) => row.count));
      rows.forEach((row) => {
        const line = el('div', 'bar-row');
        line.appendChild(el('span', '', row.label));
        const fill = el('div', 'fill');
        fill.style.width = `${(row.count / max) * 100}%`;
        line.appendChild(fill);
        line.appendChild(el('span', '', String(row.count)));
        container.appendChild(line);
      });
    };

    const renderCalendar = (calendar) => {
      document.getElementById('calendar-title').textContent =
        `Progress Tracker (${calendar.label})`;
      const grid = document.getElementById('calendar');
      grid.replaceChildren();
      WEEKDAYS.forEach((name) => grid.appendChild(el('div', 'head', name)));
      for (let i = 0; i < calendar.leading_blanks; i += 1) {
        grid.appendChild(el('div'));
      }
      calendar.days.forEach((day) => {
        const tile = el('div', `tile ${day.has_tasks ? 'completed' : 'incomplete'}`, String(day.day));
        tile.title = day.date;
        grid.appendChild(tile);
      });
    };

    const loadProgress = async () => {
      const progress = await request('GET', '/api/progress');
      renderCalendar(progress.calendar);
      document.getElementById('streak-bar').style.width = `${progress.streak_ratio * 100}%`;
      document.getElementById('streak-text').textContent =
        `Current Streak: ${progress.streak} days`;
      renderBars(
        document.getElementById('distribution'),
        progress.type_distribution.map((item) => ({ label: item.type, count: item.count }))
      );
      renderBars(
        document.getElementById('per-day'),
        progress.tasks_per_day.map((item) => ({ label: item.date, count: item.count }))
      );
    };

    const loadTodos = async () => {
      const todos = await request('GET', '/api/todos');
      const list = document.getElementById('todos');
      list.replaceChildren();
      if (!todos.length) {
        list.appendChild(el('p', 'empty', 'No tasks in your to-do list.'));
        return;
      }
      todos.forEach((todo) => {
        const row = el('div', `todo${todo.completed ? ' done' : ''}`);
        const check = el('input');
        check.type = 'checkbox';
        check.checked = todo.completed;
        check.addEventListener('change', () => {
          request('POST', `/api/todos/${todo.id}/toggle`, { completed: check.checked })
            .then(loadTodos)
            .catch((err) => setStatus(err.message, 'error'));
        });
        const remove = el('button', '', 'Delete');
        remove.addEventListener('click', () => {
          request('DELETE', `/api/todos/${todo.id}`)
            .then(loadTodos)
            .catch((err) => setStatus(err.message, 'error'));
        });
        row.appendChild(check);
        row.appendChild(el('span', 'text', todo.task));
        row.appendChild(el('span', '', todo.priority));
        row.appendChild(el('span', '', `Due: ${todo.deadline}`));
        row.appendChild(remove);
        list.appendChild(row);
      });
    };

    document.querySelectorAll('nav button').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('nav button').forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('.view').forEach((view) => {
          view.classList.toggle('active', view.id === `view-${button.dataset.view}`);
        });
        setStatus('', '');
        if (button.dataset.view === 'track') {
          loadProgress().catch((err) => setStatus(err.message, 'error'));
        }
      });
    });

    document.getElementById('task-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      request('POST', '/api/tasks', {
        type: form.get('type'),
        description: form.get('description'),
        priority: form.get('priority')
      })
        .then((logged) => {
          event.target.reset();
          setStatus(`Logged ${logged.entry.type} for today (${logged.date})`, 'ok');
          return loadProgress();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('todo-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      request('POST', '/api/todos', {
        task: form.get('task'),
        priority: form.get('priority'),
        deadline: form.get('deadline')
      })
        .then(() => {
          event.target.elements.task.value = '';
          return loadTodos();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('reset-button').addEventListener('click', () => {
      if (!window.confirm('Reset all data?')) {
        return;
      }
      request('POST', '/api/reset', { confirm: true })
        .then(() => {
          setStatus('All data has been reset!', 'ok');
          return Promise.all([loadProgress(), loadTodos()]);
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    Promise.all([loadProgress(), loadTodos()]).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerData;
    use crate::stats::{build_progress_at, StreakAnchor};
    use chrono::NaiveDate;

    #[test]
    fn index_fills_every_placeholder() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let progress = build_progress_at(today, &LedgerData::default(), StreakAnchor::LatestLog);

        let html = render_index(&progress);

        assert!(!html.contains("{{"));
        assert!(html.contains("Today is 2024-02-10"));
        assert!(html.contains(r#"<option value="Exercise">Exercise</option>"#));
        assert!(html.contains(r#"<option value="Medium">Medium</option>"#));
    }
}
