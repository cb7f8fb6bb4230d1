//! Knuth's subtractive generator, bit-compatible with the .NET `System.Random`
//! seeded constructor. Starfields and belt glyphs depend on its exact output
//! sequence, so tiles rendered elsewhere with the same seed line up.

const MBIG: i32 = i32::MAX;
const MSEED: i32 = 161_803_398;

#[derive(Debug, Clone)]
pub struct SubtractiveRng {
    seed_array: [i32; 56],
    inext: usize,
    inextp: usize,
}

impl SubtractiveRng {
    pub fn new(seed: i32) -> Self {
        let mut seed_array = [0i32; 56];
        let subtraction = if seed == i32::MIN { i32::MAX } else { seed.abs() };
        let mut mj = MSEED - subtraction;
        seed_array[55] = mj;
        let mut mk = 1i32;
        for i in 1..55 {
            let ii = (21 * i) % 55;
            seed_array[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = seed_array[ii];
        }
        for _ in 1..5 {
            for i in 1..56 {
                let v = seed_array[i].wrapping_sub(seed_array[1 + (i + 30) % 55]);
                seed_array[i] = if v < 0 { v.wrapping_add(MBIG) } else { v };
            }
        }
        Self { seed_array, inext: 0, inextp: 21 }
    }

    fn internal_sample(&mut self) -> i32 {
        let mut inext = self.inext + 1;
        if inext >= 56 {
            inext = 1;
        }
        let mut inextp = self.inextp + 1;
        if inextp >= 56 {
            inextp = 1;
        }

        let mut ret = self.seed_array[inext].wrapping_sub(self.seed_array[inextp]);
        if ret == MBIG {
            ret -= 1;
        }
        if ret < 0 {
            ret = ret.wrapping_add(MBIG);
        }

        self.seed_array[inext] = ret;
        self.inext = inext;
        self.inextp = inextp;
        ret
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.internal_sample() as f64 * (1.0 / MBIG as f64)
    }

    /// Uniform in `[0, 1)`, narrowed to `f32`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Non-negative integer below `i32::MAX`.
    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        self.internal_sample()
    }

    /// Integer in `[0, max)`; `0` when `max <= 0`.
    pub fn next_below(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        (self.next_f64() * max as f64) as i32
    }
}
