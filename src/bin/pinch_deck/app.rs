//! Simulator loop: keyboard -> fake tracker -> control bank -> mixer queue.

use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::info;

use pinch_deck::{
    geometry::Point,
    hand::PinchDetector,
    mixer::{DeckMapper, DeckParams, MessageReceiver, MixerMessage},
    ControlBank, ControlSnapshot, HandObservation, Handedness, Settings, SidePair,
};

use super::hands::{SimHand, ORBIT_STEP, STEP};
use super::ui;

/// Mixer queue depth. Four controls produce at most four messages a frame.
const QUEUE_CAPACITY: usize = 64;
/// ~60 fps
const FRAME: Duration = Duration::from_millis(16);

/// Stand-in for the mixing engine: drains the queue and remembers what it
/// was told.
pub struct EngineView {
    rx: Consumer<MixerMessage>,
    pub decks: SidePair<DeckParams>,
    pub received: u64,
}

impl EngineView {
    fn new(rx: Consumer<MixerMessage>) -> Self {
        Self {
            rx,
            decks: SidePair::default(),
            received: 0,
        }
    }

    fn drain(&mut self) {
        while let Some(msg) = MessageReceiver::pop(&mut self.rx) {
            self.received += 1;
            let deck = &mut self.decks[msg.deck()];
            match msg {
                MixerMessage::SetTempo { tempo, .. } => deck.tempo = tempo,
                MixerMessage::SetVolume { volume, .. } => deck.volume = volume,
            }
        }
    }
}

pub struct App {
    pub settings: Settings,
    pub bank: ControlBank,
    mapper: DeckMapper,
    detector: PinchDetector,
    tx: Producer<MixerMessage>,
    pub engine: EngineView,
    pub hands: SidePair<SimHand>,
    pub snapshot: ControlSnapshot,
    should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> EyreResult<Self> {
        let bank = ControlBank::new(&settings.controls).wrap_err("invalid control layout")?;
        let (tx, rx) = RingBuffer::new(QUEUE_CAPACITY);

        // Start each cursor just right of its wheel center
        let start = |side: Handedness| {
            let c = bank.deck(side).center();
            SimHand::new(side, Point::new(c.x + 0.1, c.y))
        };
        let hands = SidePair::new(start(Handedness::Left), start(Handedness::Right));

        Ok(Self {
            mapper: DeckMapper::new(settings.mixer),
            // Simulated labels are already the performer's hands
            detector: PinchDetector::new(settings.pinch_threshold, false),
            tx,
            engine: EngineView::new(rx),
            hands,
            snapshot: ControlSnapshot::default(),
            should_quit: false,
            bank,
            settings,
        })
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.step();
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(FRAME)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        info!(
            frames = self.bank.frame(),
            received = self.engine.received,
            dropped = self.mapper.dropped(),
            "simulator finished"
        );
        Ok(())
    }

    /// One tracker frame.
    fn step(&mut self) {
        let mut observations: [Option<HandObservation>; 2] = [None, None];
        for (slot, (side, hand)) in observations.iter_mut().zip(self.hands.iter()) {
            if hand.visible {
                *slot = Some(self.detector.observe(side, hand.landmarks()));
            }
        }
        let observations: Vec<HandObservation> = observations.into_iter().flatten().collect();

        self.snapshot = self.bank.update(&observations);
        self.mapper.apply(&self.snapshot, &mut self.tx);
        self.engine.drain();
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,

            // Left hand
            KeyCode::Char('w') => self.hands.left.nudge(0.0, -STEP),
            KeyCode::Char('s') => self.hands.left.nudge(0.0, STEP),
            KeyCode::Char('a') => self.hands.left.nudge(-STEP, 0.0),
            KeyCode::Char('d') => self.hands.left.nudge(STEP, 0.0),
            KeyCode::Char('e') => toggle(&mut self.hands.left.pinching),
            KeyCode::Char('1') => toggle(&mut self.hands.left.visible),
            KeyCode::Char('z') => self.orbit(Handedness::Left, -ORBIT_STEP),
            KeyCode::Char('x') => self.orbit(Handedness::Left, ORBIT_STEP),

            // Right hand
            KeyCode::Up => self.hands.right.nudge(0.0, -STEP),
            KeyCode::Down => self.hands.right.nudge(0.0, STEP),
            KeyCode::Left => self.hands.right.nudge(-STEP, 0.0),
            KeyCode::Right => self.hands.right.nudge(STEP, 0.0),
            KeyCode::Enter => toggle(&mut self.hands.right.pinching),
            KeyCode::Char('2') => toggle(&mut self.hands.right.visible),
            KeyCode::Char(',') => self.orbit(Handedness::Right, -ORBIT_STEP),
            KeyCode::Char('.') => self.orbit(Handedness::Right, ORBIT_STEP),

            KeyCode::Char('r') => {
                self.bank.reset_all();
                self.mapper.reset();
            }
            KeyCode::Char('p') => self.bank.restore_knob_defaults(),
            _ => {}
        }
    }

    fn orbit(&mut self, side: Handedness, degrees: f32) {
        let center = self.bank.deck(side).center();
        self.hands[side].orbit(center, degrees);
    }

    pub fn mapper(&self) -> &DeckMapper {
        &self.mapper
    }
}

fn toggle(flag: &mut bool) {
    *flag = !*flag;
}
