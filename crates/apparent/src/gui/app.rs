use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::diagram::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use telltale::geometry::Point;
use telltale::{Controller, Diagram, Key, PointerEvent, Response};

pub struct AppModel {
    pub diagram: Rc<RefCell<Diagram>>,
    pub controller: Controller,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Key(Key),
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn drag_point(gesture: &gtk::GestureDrag, dx: f64, dy: f64) -> Option<Point> {
    gesture
        .start_point()
        .map(|(x, y)| Point::new(x + dx, y + dy))
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
            set_title: Some("Apparent Wind"),
            set_default_width: DEFAULT_WIDTH,
            set_default_height: DEFAULT_HEIGHT,

            // a window losing focus mid-drag never sees the release
            connect_is_active_notify[sender] => move |window| {
                if !window.is_active() {
                    sender.input(AppMsg::Pointer(PointerEvent::Cancel));
                }
            },

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match Key::from_name(key.name().as_deref().unwrap_or_default()) {
                        Key::Other => glib::Propagation::Proceed,
                        key => {
                            sender.input(AppMsg::Key(key));
                            glib::Propagation::Stop
                        }
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "apparent-canvas",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureDrag {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::Down(Point::new(x, y))));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some(point) = drag_point(gesture, dx, dy) {
                            sender.input(AppMsg::Pointer(PointerEvent::Move(point)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        let point = drag_point(gesture, dx, dy).unwrap_or_default();
                        sender.input(AppMsg::Pointer(PointerEvent::Up(point)));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Pointer(PointerEvent::Cancel));
                    },
                }
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

        let mut diagram = Diagram::new(
            config.wind.seed(),
            config.boat.seed(),
            DEFAULT_WIDTH as f64,
            DEFAULT_HEIGHT as f64,
        );
        diagram.select_ring(config.interaction.selected);

        let model = AppModel {
            diagram: Rc::new(RefCell::new(diagram)),
            controller: Controller::new(config.interaction.settings()),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let diagram_draw = model.diagram.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = diagram::draw(cr, &diagram_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let response = match msg {
            AppMsg::Pointer(event) => self
                .controller
                .handle_pointer(&mut self.diagram.borrow_mut(), event),
            AppMsg::Key(key) => self
                .controller
                .handle_key(&mut self.diagram.borrow_mut(), key),
            AppMsg::Resize(width, height) => self.controller.handle_resize(
                &mut self.diagram.borrow_mut(),
                width as f64,
                height as f64,
            ),
            AppMsg::ConfigReload => self.reload_config(),
        };

        if response.redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn reload_config(&mut self) -> Response {
        match config::load_config() {
            Ok(new_config) => {
                self.diagram
                    .borrow_mut()
                    .apply_specs(new_config.wind.spec(), new_config.boat.spec());
                self.controller
                    .set_settings(new_config.interaction.settings());
                log::info!("Configuration reloaded");
                Response::new(true)
            }
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                Response::default()
            }
        }
    }
}
