use crate::apps;
use crate::config::{self, Config, DrawerStyle};
use crate::events::AppEvent;
use crate::gui::drawer::{self, DrawerAction, DrawerState};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crown::geom::{Point, Size};
use crown::mapper::Feedback;
use crown::router::{PointerEvent, TransformEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<DrawerState>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Rotate(i32),
    SetStyle(DrawerStyle),
    ToggleStyle,
    ConfigReload,
    UnhideAll,
    EntriesChanged,
    Resize(Size),
    Pointer(PointerEvent),
    Transform(TransformEvent),
    Frame(u64),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Rotate(steps) => AppMsg::Rotate(steps),
            AppEvent::SetStyle(style) => AppMsg::SetStyle(style),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::UnhideAll => AppMsg::UnhideAll,
            AppEvent::EntriesChanged => AppMsg::EntriesChanged,
        }
    }
}

fn now_ms() -> u64 {
    (glib::monotonic_time() / 1000).max(0) as u64
}

/// Tracks a pinch so GTK's cumulative scale arrives as per-event changes.
#[derive(Debug, Default)]
struct PinchTracker {
    scale: Cell<f64>,
    centroid: Cell<Option<Point>>,
}

impl PinchTracker {
    fn begin(&self) {
        self.scale.set(1.0);
        self.centroid.set(None);
    }

    fn update(&self, scale: f64, centroid: Point) -> TransformEvent {
        let previous_scale = self.scale.replace(scale);
        let pan = self
            .centroid
            .replace(Some(centroid))
            .map(|last| centroid - last)
            .unwrap_or(Point::ZERO);
        let zoom = if previous_scale > 0.0 {
            scale / previous_scale
        } else {
            1.0
        };
        TransformEvent {
            centroid,
            pan,
            zoom,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "orbit-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Hide),
                        gtk::gdk::Key::Tab => sender.input(AppMsg::ToggleStyle),
                        gtk::gdk::Key::Up => sender.input(AppMsg::Rotate(-1)),
                        gtk::gdk::Key::Down => sender.input(AppMsg::Rotate(1)),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "orbit-face",

                connect_resize[sender] => move |_, w, h| {
                    sender.input(AppMsg::Resize(Size::new(w as f64, h as f64)));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::down(Point::new(x, y), now_ms())));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let at = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Pointer(PointerEvent::moved(at, now_ms())));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let at = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Pointer(PointerEvent::up(at, now_ms())));
                        }
                    },
                },

                add_controller = gtk::EventControllerScroll::new(
                    gtk::EventControllerScrollFlags::VERTICAL
                        | gtk::EventControllerScrollFlags::DISCRETE,
                ) {
                    connect_scroll[sender] => move |_, _, dy| {
                        let steps = dy.round() as i32;
                        if steps != 0 {
                            sender.input(AppMsg::Rotate(steps));
                        }
                        glib::Propagation::Stop
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let state = Rc::new(RefCell::new(DrawerState::new(&config, Size::new(400.0, 400.0))));

        let model = AppModel {
            state: state.clone(),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = drawer::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let pinch = Rc::new(PinchTracker::default());
        let zoom = gtk::GestureZoom::new();
        {
            let pinch = pinch.clone();
            zoom.connect_begin(move |_, _| pinch.begin());
        }
        {
            let sender = sender.clone();
            zoom.connect_scale_changed(move |gesture, scale| {
                if let Some((x, y)) = gesture.bounding_box_center() {
                    let event = pinch.update(scale, Point::new(x, y));
                    sender.input(AppMsg::Transform(event));
                }
            });
        }
        widgets.drawing_area.add_controller(zoom);

        let sender_tick = sender.clone();
        widgets.drawing_area.add_tick_callback(move |_, clock| {
            sender_tick.input(AppMsg::Frame((clock.frame_time() / 1000).max(0) as u64));
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
                self.state.borrow_mut().cancel_gestures();
            }
            AppMsg::Rotate(steps) => {
                let actions = self.state.borrow_mut().rotate(steps);
                self.perform(actions);
            }
            AppMsg::UnhideAll => {
                self.state.borrow_mut().unhide_all();
                self.drawing_area.queue_draw();
            }
            AppMsg::SetStyle(style) => {
                self.state.borrow_mut().set_style(style);
                self.drawing_area.queue_draw();
            }
            AppMsg::ToggleStyle => {
                let mut state = self.state.borrow_mut();
                let style = state.style().toggled();
                state.set_style(style);
                drop(state);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reconfigure(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::EntriesChanged => {
                self.state.borrow_mut().set_entries(apps::all_entries());
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(size) => {
                self.state.borrow_mut().resize(size);
            }
            AppMsg::Pointer(event) => {
                if !self.visible {
                    return;
                }
                let actions = self.state.borrow_mut().pointer(event);
                self.perform(actions);
                self.drawing_area.queue_draw();
            }
            AppMsg::Transform(event) => {
                if !self.visible {
                    return;
                }
                self.state.borrow_mut().transform(event);
                self.drawing_area.queue_draw();
            }
            AppMsg::Frame(time_ms) => {
                if !self.visible {
                    return;
                }
                let busy = self.state.borrow().needs_frame();
                if !busy {
                    return;
                }
                let actions = self.state.borrow_mut().frame(time_ms);
                self.perform(actions);
                self.drawing_area.queue_draw();
            }
        }
    }
}

impl AppModel {
    fn perform(&mut self, actions: Vec<DrawerAction>) {
        for action in actions {
            match action {
                DrawerAction::Launch(key) => {
                    let entry = self.state.borrow().entry(&key).cloned();
                    match entry.or_else(|| apps::find_entry(&key)) {
                        Some(entry) => {
                            if let Err(e) = apps::launch(&entry) {
                                log::error!("Failed to launch '{}': {}", entry.name, e);
                            }
                            self.visible = false;
                        }
                        None => log::error!("No desktop entry for {}", key),
                    }
                }
                DrawerAction::Options(key) => {
                    self.state.borrow_mut().toggle_hidden(&key);
                    self.drawing_area.queue_draw();
                }
                DrawerAction::Feedback(feedback) => self.feedback(feedback),
            }
        }
    }

    fn feedback(&self, feedback: Feedback) {
        if feedback.haptic_pulses > 0 {
            log::debug!("haptic: {} pulse(s)", feedback.haptic_pulses);
        }
        let display = WidgetExt::display(&self.root);
        for _ in 0..feedback.clicks {
            display.beep();
        }
        self.drawing_area.queue_draw();
    }
}
