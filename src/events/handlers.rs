// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Handlers for worker results and for the edits shared by keys and commands.
//!
//! Every edit is applied to the timeline straight away and then handed to
//! the task worker to persist. A failed save arrives later as an error
//! event, the local state is kept as it is.

use anyhow::Result;

use crate::{
    App,
    components::{SegmentForm, segment_form::FormTarget},
    db::{access::Invite, scan::ScanProgress},
    lookup::TrackMatch,
    model::{
        ItemType, Program, Rundown, Segment, SegmentPatch, SegmentStatus, timeline::Timeline,
    },
    tasks::AppTask,
    ticker::Ticker,
    util::format::format_short,
};

pub(super) fn handle_bootstrapped(
    app: &mut App,
    program: Program,
    rundowns: Vec<Rundown>,
    item_types: Vec<ItemType>,
) -> Result<()> {
    log::info!("Program '{}' with {} rundowns", program.name, rundowns.len());

    app.program = Some(program);
    app.item_types = item_types;
    app.rundowns.set_rundowns(rundowns);

    load_active_rundown(app)
}

/// Resets everything that belongs to the previous rundown and asks for the
/// segments of the active one.
pub(super) fn load_active_rundown(app: &mut App) -> Result<()> {
    stop_indicator(app);

    app.timeline = Timeline::new();
    app.segment_table.select(None);
    app.segment_form = None;
    app.lookup.results.clear();
    app.lookup.rundown_id = None;

    app.segments_loading = false;
    if let Some(id) = app.rundowns.active_id() {
        app.segments_loading = true;
        app.task_tx.send(AppTask::LoadSegments(id))?;
    }

    Ok(())
}

/// Edits made before the segments arrive would be overwritten by them.
fn timeline_ready(app: &mut App) -> bool {
    if app.segments_loading {
        app.set_error("Het draaiboek wordt nog geladen");
    }
    !app.segments_loading
}

pub(super) fn handle_segments_loaded(app: &mut App, rundown_id: String, segments: Vec<Segment>) {
    if app.rundowns.active_id().as_deref() != Some(rundown_id.as_str()) {
        log::debug!("Ignoring segments of inactive rundown {}", rundown_id);
        return;
    }

    app.timeline = Timeline::from_segments(segments);
    app.segments_loading = false;
    app.segment_table.clamp(app.timeline.len());
}

pub(super) fn handle_rundown_duplicated(app: &mut App, rundown: Rundown) -> Result<()> {
    app.set_info(format!("'{}' aangemaakt", rundown.name));
    app.rundowns.add(rundown);

    load_active_rundown(app)
}

pub(super) fn handle_lookup_results(
    app: &mut App,
    request: u64,
    rundown_id: String,
    results: Vec<TrackMatch>,
) {
    let current = request == app.lookup.request
        && app.lookup.rundown_id.as_deref() == Some(rundown_id.as_str())
        && app.rundowns.active_id().as_deref() == Some(rundown_id.as_str());

    if !current {
        log::debug!("Ignoring stale lookup results for request {}", request);
        return;
    }

    if results.is_empty() {
        app.set_info("Geen nummers gevonden");
    }
    app.lookup.results = results;
}

pub(super) fn handle_scan_progress(app: &mut App, progress: ScanProgress) {
    match progress {
        ScanProgress::StartedDirectory(dir) => {
            app.scan_progress = Some(0);
            app.set_info(format!("Bibliotheek scannen: {}", dir));
        }
        ScanProgress::ProcessedFile(count) => app.scan_progress = Some(count),
        ScanProgress::FinishedDirectory(_) => {}
    }
}

pub(super) fn handle_scan_finished(app: &mut App, count: i64) {
    app.scan_progress = None;
    app.set_info(format!("{} nummers in de bibliotheek", count));
}

pub(super) fn handle_invite_created(app: &mut App, invite: Invite) {
    app.set_info(format!(
        "Uitnodiging {} als {}, geldig tot {}",
        invite.token,
        invite.role.key(),
        invite.expires_at.format("%Y-%m-%d %H:%M")
    ));
}

/// Advances the play indicator, ticks from a cancelled ticker are ignored.
pub(super) fn handle_clock_tick(app: &mut App, generation: u64) {
    let current = app.ticker.as_ref().map(|ticker| ticker.generation());
    if current != Some(generation) {
        return;
    }

    if app.indicator.tick(app.timeline.total_duration()) {
        app.ticker = None;
        app.set_info("Einde van de uitzending");
    }
}

/// Starts or pauses the play indicator.
pub(super) fn toggle_indicator(app: &mut App) {
    if app.indicator.pause() {
        app.ticker = None;
        return;
    }

    if app.timeline.total_duration() == 0 {
        app.set_info("Het draaiboek is leeg");
        return;
    }

    if app.indicator.start() {
        app.ticker_generation += 1;
        app.ticker = Some(Ticker::start(app.ticker_generation, app.event_tx.clone()));
    }
}

/// Stops the play indicator and rewinds it to the start of the show.
pub(crate) fn stop_indicator(app: &mut App) {
    app.indicator.stop();
    app.ticker = None;
}

pub(super) fn handle_submit_form(app: &mut App) -> Result<()> {
    let Some(form) = app.segment_form.as_mut() else {
        return Ok(());
    };

    let segment = match form.build(&app.item_types) {
        Ok(segment) => segment,
        Err(e) => {
            form.error = Some(e.to_string());
            return Ok(());
        }
    };

    let target = form.target.clone();
    app.segment_form = None;

    match target {
        FormTarget::New { position } => insert_segment(app, position, segment),
        FormTarget::Edit { .. } => update_segment(app, segment),
    }
}

/// Opens the form for a new segment at `position`, pre-filled from `template`.
pub(super) fn open_new_form(app: &mut App, position: usize, template: &Segment) {
    if app.rundowns.active().is_none() {
        app.set_error("Geen draaiboek geselecteerd");
        return;
    }

    if !timeline_ready(app) {
        return;
    }

    app.segment_form = Some(SegmentForm::create(position, template));
}

pub(super) fn open_edit_form(app: &mut App, index: usize) {
    if let Some(segment) = app.timeline.segments().get(index) {
        app.segment_form = Some(SegmentForm::edit(segment));
    }
}

pub(super) fn insert_segment(app: &mut App, position: usize, segment: Segment) -> Result<()> {
    let Some(rundown_id) = app.rundowns.active_id() else {
        app.set_error("Geen draaiboek geselecteerd");
        return Ok(());
    };

    if !timeline_ready(app) {
        return Ok(());
    }

    let Some(stored) = app.timeline.insert_at(position, segment) else {
        app.set_error(format!("Ongeldige positie {}", position + 1));
        return Ok(());
    };
    let stored = stored.clone();

    app.segment_table.select(Some(position));
    app.set_info(format!("'{}' toegevoegd ({})", stored.title, format_short(stored.duration)));

    app.task_tx.send(AppTask::InsertSegment {
        rundown_id,
        segment: stored,
        position,
    })?;

    Ok(())
}

pub(super) fn update_segment(app: &mut App, segment: Segment) -> Result<()> {
    if !timeline_ready(app) {
        return Ok(());
    }

    let id = segment.id.clone();

    if !app.timeline.update(&id, SegmentPatch::replace_with(segment)) {
        app.set_error("Segment niet gevonden");
        return Ok(());
    }

    if let Some(updated) = app.timeline.get(&id) {
        app.task_tx.send(AppTask::UpdateSegment(updated.clone()))?;
    }

    Ok(())
}

pub(super) fn remove_segment(app: &mut App, index: usize) -> Result<()> {
    if !timeline_ready(app) {
        return Ok(());
    }

    let Some(id) = app.timeline.segments().get(index).map(|s| s.id.clone()) else {
        app.set_error(format!("Segment {} bestaat niet", index + 1));
        return Ok(());
    };

    if let Some(removed) = app.timeline.remove(&id) {
        app.segment_table.clamp(app.timeline.len());
        app.set_info(format!("'{}' verwijderd", removed.title));
        app.task_tx.send(AppTask::DeleteSegment(id))?;
    }

    Ok(())
}

pub(super) fn move_segment(app: &mut App, from: usize, to: usize) -> Result<()> {
    let Some(rundown_id) = app.rundowns.active_id() else {
        return Ok(());
    };

    if !timeline_ready(app) {
        return Ok(());
    }

    if !app.timeline.move_to(from, to) {
        app.set_error(format!("Kan segment {} niet naar {} verplaatsen", from + 1, to + 1));
        return Ok(());
    }

    if from != to {
        app.segment_table.select(Some(to));
        app.task_tx.send(AppTask::ReorderSegments {
            rundown_id,
            ids: app.timeline.ids(),
        })?;
    }

    Ok(())
}

pub(super) fn set_status(app: &mut App, index: usize, status: SegmentStatus) -> Result<()> {
    if !timeline_ready(app) {
        return Ok(());
    }

    let Some(id) = app.timeline.segments().get(index).map(|s| s.id.clone()) else {
        app.set_error(format!("Segment {} bestaat niet", index + 1));
        return Ok(());
    };

    app.timeline.update(&id, SegmentPatch::status(status));

    if let Some(updated) = app.timeline.get(&id) {
        app.task_tx.send(AppTask::UpdateSegment(updated.clone()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        components::segment_form::FormField,
        events::{
            AppEvent, apply_event,
            tests::{app, load, titles},
        },
        lookup::TrackMatch,
        model::{SegmentKind, SegmentStatus},
        tasks::AppTask,
    };

    use super::*;

    #[test]
    fn test_insert_is_optimistic_and_persisted() {
        let (mut app, tasks) = app();
        load(&mut app, &[("Opening", 120), ("Afsluiting", 60)]);

        let segment = Segment::new(&SegmentKind::Jingle, "Station-id");
        insert_segment(&mut app, 1, segment).unwrap();

        assert_eq!(titles(&app), ["Opening", "Station-id", "Afsluiting"]);
        assert_eq!(app.segment_table.selected(), Some(1));

        let Ok(AppTask::InsertSegment { rundown_id, segment, position }) = tasks.try_recv() else {
            panic!("expected insert task");
        };
        assert_eq!(rundown_id, "r1");
        assert_eq!(position, 1);
        assert!(!segment.id.is_empty());
        assert_eq!(app.timeline.position(&segment.id), Some(1));
    }

    #[test]
    fn test_insert_out_of_range_is_reported() {
        let (mut app, tasks) = app();
        load(&mut app, &[("Opening", 120)]);

        insert_segment(&mut app, 5, Segment::new(&SegmentKind::Talk, "Te ver")).unwrap();

        assert_eq!(titles(&app), ["Opening"]);
        assert!(app.status.is_error);
        assert!(tasks.try_recv().is_err());
    }

    #[test]
    fn test_edits_wait_for_loaded_segments() {
        let (mut app, tasks) = app();
        assert!(app.segments_loading);

        insert_segment(&mut app, 0, Segment::new(&SegmentKind::Jingle, "Snel")).unwrap();
        open_new_form(&mut app, 0, &Segment::new(&SegmentKind::Talk, "Later"));

        assert!(app.status.is_error);
        assert!(app.segment_form.is_none());
        assert!(tasks.try_recv().is_err());

        load(&mut app, &[("Bestaand", 60)]);
        assert!(!app.segments_loading);
        assert_eq!(titles(&app), ["Bestaand"]);

        insert_segment(&mut app, 0, Segment::new(&SegmentKind::Jingle, "Snel")).unwrap();
        assert_eq!(titles(&app), ["Snel", "Bestaand"]);
        assert!(matches!(tasks.try_recv(), Ok(AppTask::InsertSegment { position: 0, .. })));
    }

    #[test]
    fn test_move_sends_new_order() {
        let (mut app, tasks) = app();
        load(&mut app, &[("A", 10), ("B", 20), ("C", 30)]);

        move_segment(&mut app, 0, 2).unwrap();

        assert_eq!(titles(&app), ["B", "C", "A"]);
        let Ok(AppTask::ReorderSegments { ids, .. }) = tasks.try_recv() else {
            panic!("expected reorder task");
        };
        assert_eq!(ids, ["s1", "s2", "s0"]);
    }

    #[test]
    fn test_remove_and_status() {
        let (mut app, tasks) = app();
        load(&mut app, &[("A", 10), ("B", 20)]);

        set_status(&mut app, 1, SegmentStatus::Checked).unwrap();
        assert_eq!(app.timeline.segments()[1].status, SegmentStatus::Checked);
        assert!(matches!(tasks.try_recv(), Ok(AppTask::UpdateSegment(s)) if s.id == "s1"));

        remove_segment(&mut app, 0).unwrap();
        assert_eq!(titles(&app), ["B"]);
        assert!(matches!(tasks.try_recv(), Ok(AppTask::DeleteSegment(id)) if id == "s0"));

        remove_segment(&mut app, 4).unwrap();
        assert!(app.status.is_error);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (mut app, tasks) = app();
        load(&mut app, &[("A", 10)]);

        open_new_form(&mut app, 1, &Segment::new(&SegmentKind::Talk, ""));
        handle_submit_form(&mut app).unwrap();

        let form = app.segment_form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Titel mag niet leeg zijn"));
        assert_eq!(titles(&app), ["A"]);
        assert!(tasks.try_recv().is_err());
    }

    #[test]
    fn test_edit_form_replaces_segment() {
        let (mut app, tasks) = app();
        load(&mut app, &[("A", 10)]);

        open_edit_form(&mut app, 0);
        app.segment_form.as_mut().unwrap().set(FormField::Title, "Nieuw");
        handle_submit_form(&mut app).unwrap();

        assert!(app.segment_form.is_none());
        assert_eq!(titles(&app), ["Nieuw"]);
        assert!(matches!(tasks.try_recv(), Ok(AppTask::UpdateSegment(s)) if s.id == "s0"));
    }

    #[test]
    fn test_indicator_ignores_stale_ticks() {
        let (mut app, _tasks) = app();
        load(&mut app, &[("A", 3)]);

        toggle_indicator(&mut app);
        let generation = app.ticker_generation;
        assert!(app.indicator.is_running());

        handle_clock_tick(&mut app, generation - 1);
        assert_eq!(app.indicator.elapsed(), 0);

        handle_clock_tick(&mut app, generation);
        assert_eq!(app.indicator.elapsed(), 1);

        // Pausing cancels the ticker, its queued ticks no longer count.
        toggle_indicator(&mut app);
        handle_clock_tick(&mut app, generation);
        assert_eq!(app.indicator.elapsed(), 1);
    }

    #[test]
    fn test_indicator_stops_at_end_of_show() {
        let (mut app, _tasks) = app();
        load(&mut app, &[("A", 2)]);

        toggle_indicator(&mut app);
        let generation = app.ticker_generation;
        handle_clock_tick(&mut app, generation);
        handle_clock_tick(&mut app, generation);

        assert!(!app.indicator.is_running());
        assert_eq!(app.indicator.elapsed(), 0);
        assert!(app.ticker.is_none());
    }

    #[test]
    fn test_switching_rundown_stops_indicator() {
        let (mut app, tasks) = app();
        load(&mut app, &[("A", 60)]);

        toggle_indicator(&mut app);
        app.rundowns.select_next();
        load_active_rundown(&mut app).unwrap();

        assert!(!app.indicator.is_running());
        assert!(app.ticker.is_none());
        assert!(app.timeline.is_empty());
        assert!(matches!(tasks.try_recv(), Ok(AppTask::LoadSegments(id)) if id == "r2"));
    }

    #[test]
    fn test_stale_lookup_results_are_ignored() {
        let (mut app, _tasks) = app();
        app.lookup.request = 2;
        app.lookup.rundown_id = Some("r1".to_string());

        let result = || {
            vec![TrackMatch {
                name: "Song".to_string(),
                artist: "Band".to_string(),
                duration: 200,
                preview_url: None,
            }]
        };

        let stale = AppEvent::LookupResults {
            request: 1,
            rundown_id: "r1".to_string(),
            results: result(),
        };
        apply_event(&mut app, stale).unwrap();
        assert!(app.lookup.results.is_empty());

        handle_lookup_results(&mut app, 2, "r2".to_string(), result());
        assert!(app.lookup.results.is_empty());

        handle_lookup_results(&mut app, 2, "r1".to_string(), result());
        assert_eq!(app.lookup.results.len(), 1);
    }
}
