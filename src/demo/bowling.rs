//! Bowling game scoring demo

use std::cell::RefCell;
use std::sync::Arc;

use xfixture::assertions::should_equal;
use xfixture::{Fixture, FixtureConfig, Host};

#[derive(Debug, Default)]
struct Game {
    score: u32,
}

impl Game {
    fn roll(&mut self, pins: u32) {
        self.score += pins;
    }

    fn roll_many(&mut self, pins: u32, times: usize) {
        for _ in 0..times {
            self.roll(pins);
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}

pub fn run(host: Arc<dyn Host>, config: &FixtureConfig) {
    let game = RefCell::new(Game::default());

    let mut fixture = Fixture::new("Bowling Game Score", host).with_config(config.clone());
    fixture
        .setup(|| *game.borrow_mut() = Game::default())
        .test("After rolling all gutter balls", |rec| {
            game.borrow_mut().roll_many(0, 20);
            rec.so("No points will be earned", game.borrow().score(), should_equal, &[0]);
        })
        .test("All balls knock down a single pin--score of 20", |rec| {
            game.borrow_mut().roll_many(1, 20);
            rec.so("Each roll will score a point", game.borrow().score(), should_equal, &[20]);
        })
        .skip_test("Spare earns bonus", |rec| {
            let mut game = game.borrow_mut();
            game.roll(3);
            game.roll(7);
            game.roll(3);
            game.roll_many(0, 17);
            rec.so(
                "The roll after the spare should be counted twice",
                game.score(),
                should_equal,
                &[16],
            );
        });
    fixture.run();
}
