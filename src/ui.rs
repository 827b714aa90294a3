use crate::models::{DayView, ProgressSummary};

pub fn render_index(today: &DayView, summary: &ProgressSummary) -> String {
    let heading = format!("Day {} - {} · {}", today.day_number, today.day_label, today.formatted_date);
    let done = today.done;

    INDEX_HTML
        .replace("{{DAY_NUMBER}}", &today.day_number.to_string())
        .replace("{{HEADING}}", &escape_html(&heading))
        .replace("{{READING}}", &escape_html(&today.reading))
        .replace("{{DONE_CLASS}}", if done { "done" } else { "" })
        .replace("{{TOGGLE_LABEL}}", if done { "Completed" } else { "Mark complete" })
        .replace("{{COMPLETED}}", &summary.completed_count.to_string())
        .replace("{{TOTAL}}", &summary.total_days.to_string())
        .replace("{{PERCENT}}", &summary.rounded_percentage.to_string())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reading Plan</title>
  <style>
    :root {
      --paper: #fdf7f9;
      --ink: #1f2a44;
      --muted: #5b6785;
      --rose: #f6c6d4;
      --done: #22a06b;
      --today: #3b6fe0;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 48px rgba(31, 42, 68, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, #fff0f5, var(--paper) 45%, #eef2fb);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 28px;
      padding: 28px 16px 80px;
    }

    .top { display: flex; flex-direction: column; align-items: center; gap: 12px; }

    .ring { position: relative; width: 132px; height: 132px; }
    .ring svg { transform: rotate(-90deg); }
    .ring circle { fill: none; stroke-width: 6; }
    .ring .track { stroke: rgba(91, 103, 133, 0.2); }
    .ring .fill { stroke: var(--done); stroke-linecap: round; transition: stroke-dashoffset 400ms ease; }
    .ring .label {
      position: absolute; inset: 0; display: grid; place-items: center;
      font-size: 1.6rem; font-weight: 700;
    }

    .countdown { display: flex; gap: 14px; font-size: 2.4rem; font-weight: 700; font-variant-numeric: tabular-nums; }
    .countdown span small { display: block; font-size: 0.75rem; font-weight: 400; color: var(--muted); text-align: center; }

    .card {
      width: min(560px, 100%);
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 14px;
    }

    .card header { display: flex; justify-content: space-between; align-items: center; gap: 8px; }
    .card h2 { margin: 0; font-size: 1.05rem; }
    .card .reading { font-size: 1.4rem; font-weight: 600; min-height: 1.6em; }

    button {
      border: 1px solid rgba(31, 42, 68, 0.18);
      background: white;
      border-radius: 10px;
      padding: 8px 14px;
      font: inherit;
      cursor: pointer;
    }
    button:disabled { opacity: 0.4; cursor: default; }
    button.toggle.done { background: var(--done); color: white; border-color: var(--done); }

    .summary { text-align: center; }
    .summary strong { font-size: 1.4rem; }

    details.calendar { width: min(560px, 100%); }
    .month h3 { text-align: center; font-size: 0.95rem; margin: 14px 0 6px; }
    .grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 4px; }
    .grid .cell { height: 36px; border-radius: 8px; display: grid; place-items: center; font-size: 0.85rem; border: none; padding: 0; }
    .cell.completed { background: rgba(34, 160, 107, 0.22); }
    .cell.today { background: var(--today); color: white; }
    .cell.pending { background: #e9edf7; }
    .cell.outside { background: transparent; color: #c3a9b3; }

    .weeks { width: min(760px, 100%); display: grid; gap: 10px; }
    .week { background: var(--card); border-radius: 14px; box-shadow: var(--shadow); }
    .week summary { padding: 14px 18px; cursor: pointer; display: flex; justify-content: space-between; }
    .week ul { list-style: none; margin: 0; padding: 0 18px 14px; display: grid; gap: 6px; }
    .week li { display: flex; gap: 10px; align-items: baseline; cursor: pointer; }
    .dot { width: 8px; height: 8px; border-radius: 50%; background: #8a94ad; flex-shrink: 0; }
    .dot.today { background: var(--today); }
    .dot.done { background: var(--done); }
    .week .muted { color: var(--muted); font-size: 0.85rem; }
  </style>
</head>
<body>
  <section class="top">
    <div class="ring">
      <svg width="132" height="132" viewBox="0 0 132 132">
        <circle class="track" cx="66" cy="66" r="60" />
        <circle class="fill" id="ring-fill" cx="66" cy="66" r="60" />
      </svg>
      <div class="label" id="ring-label">{{PERCENT}}%</div>
    </div>
    <div class="countdown" id="countdown">
      <span><b id="cd-days">0</b><small>days</small></span>
      <span><b id="cd-hours">00</b><small>hours</small></span>
      <span><b id="cd-minutes">00</b><small>mins</small></span>
      <span><b id="cd-seconds">00</b><small>secs</small></span>
    </div>
  </section>

  <article class="card" id="card" data-day="{{DAY_NUMBER}}">
    <header>
      <button id="prev" type="button" aria-label="Previous day">&larr;</button>
      <h2 id="card-heading">{{HEADING}}</h2>
      <button id="next" type="button" aria-label="Next day">&rarr;</button>
    </header>
    <div class="reading" id="card-reading">{{READING}}</div>
    <form method="post" action="/days/{{DAY_NUMBER}}/toggle" id="toggle-form">
      <button class="toggle {{DONE_CLASS}}" id="toggle" type="submit">{{TOGGLE_LABEL}}</button>
    </form>
  </article>

  <section class="summary" role="status" aria-live="polite">
    <strong id="summary-count">{{COMPLETED}} of {{TOTAL}} days completed</strong>
    <div id="summary-percent">{{PERCENT}}% progress through the reading plan</div>
  </section>

  <details class="calendar">
    <summary>Jump to date</summary>
    <div id="calendar"></div>
  </details>

  <section class="weeks" id="weeks"></section>

  <script>
    const RADIUS = 60;
    const CIRCUMFERENCE = 2 * Math.PI * RADIUS;
    let currentDay = Number(document.getElementById('card').dataset.day) || 1;

    const pad = (value) => String(value).padStart(2, '0');

    async function getJson(url, options) {
      const res = await fetch(url, options);
      if (!res.ok) throw new Error(`${url}: ${res.status}`);
      return res.json();
    }

    function renderRing(percent) {
      const fill = document.getElementById('ring-fill');
      fill.style.strokeDasharray = `${CIRCUMFERENCE}`;
      fill.style.strokeDashoffset = `${CIRCUMFERENCE * (1 - percent / 100)}`;
      document.getElementById('ring-label').textContent = `${Math.round(percent)}%`;
    }

    function renderCard(day) {
      currentDay = day.day_number;
      document.getElementById('card').dataset.day = day.day_number;
      document.getElementById('card-heading').textContent =
        `Day ${day.day_number} - ${day.day_label} · ${day.formatted_date}`;
      document.getElementById('card-reading').textContent = day.reading;
      document.getElementById('toggle-form').action = `/days/${day.day_number}/toggle`;
      const toggle = document.getElementById('toggle');
      toggle.classList.toggle('done', day.done);
      toggle.textContent = day.done ? 'Completed' : 'Mark complete';
      document.getElementById('prev').disabled = day.previous_day === null;
      document.getElementById('next').disabled = day.next_day === null;
    }

    function renderSummary(progress) {
      document.getElementById('summary-count').textContent =
        `${progress.completed_count} of ${progress.total_days} days completed`;
      document.getElementById('summary-percent').textContent =
        `${progress.rounded_percentage}% progress through the reading plan`;
      renderRing(progress.percentage);
    }

    function renderCalendar(months) {
      const root = document.getElementById('calendar');
      root.innerHTML = '';
      for (const month of months) {
        const block = document.createElement('div');
        block.className = 'month';
        const title = document.createElement('h3');
        title.textContent = month.label;
        const grid = document.createElement('div');
        grid.className = 'grid';
        for (const name of ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat']) {
          const head = document.createElement('div');
          head.className = 'cell';
          head.textContent = name;
          grid.appendChild(head);
        }
        for (let i = 0; i < month.leading_blanks; i++) {
          grid.appendChild(document.createElement('div'));
        }
        for (const day of month.days) {
          const cell = document.createElement('button');
          cell.type = 'button';
          cell.className = `cell ${day.status}`;
          cell.textContent = day.day_of_month;
          cell.disabled = day.day_number === null;
          cell.addEventListener('click', () => showDay(day.day_number));
          grid.appendChild(cell);
        }
        block.append(title, grid);
        root.appendChild(block);
      }
    }

    function renderWeeks(timeline) {
      const root = document.getElementById('weeks');
      root.innerHTML = '';
      for (const week of timeline.weeks) {
        const item = document.createElement('details');
        item.className = 'week';
        item.open = week.id === timeline.current_week_id;
        const summary = document.createElement('summary');
        summary.innerHTML = `<span><b>Week ${week.number}</b> <span class="muted">Days ${week.start_day}-${week.end_day}</span></span>`
          + `<span class="muted">${week.completed_days}/${week.total_days} completed</span>`;
        const list = document.createElement('ul');
        for (const day of week.days) {
          const row = document.createElement('li');
          const dot = document.createElement('span');
          dot.className = `dot ${day.done ? 'done' : day.is_today ? 'today' : ''}`;
          const text = document.createElement('span');
          text.textContent = `Day ${day.day_number} - ${day.day_label}, ${day.formatted_date}: ${day.reading}`;
          row.append(dot, text);
          row.addEventListener('click', () => showDay(day.day_number));
          list.appendChild(row);
        }
        item.append(summary, list);
        root.appendChild(item);
      }
    }

    async function showDay(dayNumber) {
      renderCard(await getJson(`/api/days/${dayNumber}`));
      window.scrollTo({ top: 0, behavior: 'smooth' });
    }

    async function refresh() {
      const [day, progress, calendar, timeline] = await Promise.all([
        getJson(`/api/days/${currentDay}`),
        getJson('/api/progress'),
        getJson('/api/calendar'),
        getJson('/api/weeks'),
      ]);
      renderCard(day);
      renderSummary(progress);
      renderCalendar(calendar);
      renderWeeks(timeline);
    }

    async function tickCountdown() {
      const left = await getJson('/api/countdown');
      document.getElementById('cd-days').textContent = left.days;
      document.getElementById('cd-hours').textContent = pad(left.hours);
      document.getElementById('cd-minutes').textContent = pad(left.minutes);
      document.getElementById('cd-seconds').textContent = pad(left.seconds);
    }

    document.getElementById('toggle-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      await getJson(`/api/days/${currentDay}/toggle`, { method: 'POST' });
      await refresh();
    });
    document.getElementById('prev').addEventListener('click', async () => {
      if (currentDay > 1) await showDay(currentDay - 1);
    });
    document.getElementById('next').addEventListener('click', async () => {
      await showDay(currentDay + 1).catch(() => {});
    });

    const events = new EventSource('/api/events');
    events.addEventListener('storage', () => refresh().catch(console.error));

    refresh().catch(console.error);
    tickCountdown().catch(console.error);
    setInterval(() => tickCountdown().catch(() => {}), 1000);
  </script>
</body>
</html>
"#;
